//! Defense system - Resistances

mod resistance;

pub use resistance::{
    calculate_resistances, clamp_resistance, resolve_resistance, Resistance, ResistanceSnapshot,
};
