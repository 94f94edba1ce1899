use crate::error::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Key of the single global page-number slot
pub const PAGE_NUMBER_KEY: &str = "Pagenumber";

/// Durable slot for the last-used page number.
///
/// The value is a JSON-encoded integer; every page change overwrites the
/// slot. Implementations must tolerate a missing or unparseable value by
/// returning `None`.
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn load_page(&self) -> Result<Option<u32>>;
    async fn save_page(&self, page: u32) -> Result<()>;
}

/// In-memory page store (for MVP and testing)
#[derive(Clone, Default)]
pub struct InMemoryPageStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn load_page(&self) -> Result<Option<u32>> {
        let slot = self.slot.lock();
        Ok(slot
            .as_deref()
            .and_then(|raw| serde_json::from_str::<u32>(raw).ok()))
    }

    async fn save_page(&self, page: u32) -> Result<()> {
        let encoded = serde_json::to_string(&page)?;
        *self.slot.lock() = Some(encoded);
        tracing::debug!(page, "Page number saved");
        Ok(())
    }
}
