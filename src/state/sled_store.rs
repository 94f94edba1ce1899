use crate::error::Result;
use crate::state::store::{PageStore, PAGE_NUMBER_KEY};
use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

/// Persistent page store using the Sled embedded database
#[derive(Clone, Debug)]
pub struct SledPageStore {
    db: Arc<Db>,
    tree: sled::Tree,
}

impl SledPageStore {
    /// Open or create the store at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(&path)?;
        let tree = db.open_tree("navigation")?;

        tracing::info!(path = %path.as_ref().display(), "Initialized Sled page store");

        Ok(Self {
            db: Arc::new(db),
            tree,
        })
    }
}

#[async_trait]
impl PageStore for SledPageStore {
    async fn load_page(&self) -> Result<Option<u32>> {
        let raw = self.tree.get(PAGE_NUMBER_KEY)?;
        Ok(raw.and_then(|bytes| serde_json::from_slice::<u32>(&bytes).ok()))
    }

    async fn save_page(&self, page: u32) -> Result<()> {
        let encoded = serde_json::to_vec(&page)?;
        self.tree.insert(PAGE_NUMBER_KEY, encoded)?;
        self.db.flush_async().await?;

        tracing::debug!(page, "Page number persisted");
        Ok(())
    }
}
