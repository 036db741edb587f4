use crate::tree::{TalentTreeData, TreeName};
use crate::TreeLoadError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Source of tree layouts, keyed by tree name
pub trait TreeFetcher {
    fn fetch(&self, name: TreeName) -> Result<TalentTreeData, TreeLoadError>;
}

/// Reads `<lowercase name>_tree.json` files from a directory
#[derive(Debug, Clone)]
pub struct DirTreeFetcher {
    root: PathBuf,
}

impl DirTreeFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Trees that have a data file in the directory
    pub fn available(&self) -> Result<Vec<TreeName>, TreeLoadError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| TreeLoadError::Io {
            error: e,
            path: self.root.clone(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TreeLoadError::Io {
                error: e,
                path: self.root.clone(),
            })?;
            let file_name = entry.file_name();
            let Some(stem) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix("_tree.json"))
            else {
                continue;
            };
            match TreeName::from_str(stem) {
                Ok(name) => names.push(name),
                Err(_) => debug!(file = stem, "ignoring file that names no known tree"),
            }
        }
        names.sort();
        Ok(names)
    }
}

impl TreeFetcher for DirTreeFetcher {
    fn fetch(&self, name: TreeName) -> Result<TalentTreeData, TreeLoadError> {
        let path = self.root.join(name.file_name());
        let content = std::fs::read_to_string(&path).map_err(|e| TreeLoadError::Io {
            error: e,
            path: path.clone(),
        })?;

        let tree: TalentTreeData =
            serde_json::from_str(&content).map_err(|e| TreeLoadError::Parse { error: e, path })?;

        tree.validate()
            .map_err(|message| TreeLoadError::Invalid { tree: name, message })?;

        Ok(tree)
    }
}

/// Get-or-fetch cache of tree layouts.
///
/// Each tree is fetched at most once per successful load and never invalidated.
/// Two callers racing on the same first fetch both fetch; the first stored copy wins.
pub struct TalentTreeCache<F> {
    fetcher: F,
    trees: RwLock<HashMap<TreeName, Arc<TalentTreeData>>>,
}

impl<F: TreeFetcher> TalentTreeCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            trees: RwLock::new(HashMap::new()),
        }
    }

    /// Cached tree, fetching it on first use. Fetch failures are not cached.
    pub fn load(&self, name: TreeName) -> Result<Arc<TalentTreeData>, TreeLoadError> {
        if let Some(tree) = self.get(name) {
            return Ok(tree);
        }

        info!(tree = %name, "fetching talent tree");
        let fetched = Arc::new(self.fetcher.fetch(name)?);

        let mut trees = self.trees.write().unwrap_or_else(|e| e.into_inner());
        Ok(trees.entry(name).or_insert(fetched).clone())
    }

    /// Cached tree without fetching
    pub fn get(&self, name: TreeName) -> Option<Arc<TalentTreeData>> {
        let trees = self.trees.read().unwrap_or_else(|e| e.into_inner());
        trees.get(&name).cloned()
    }

    pub fn contains(&self, name: TreeName) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.trees.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
