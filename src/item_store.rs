use std::sync::Arc;
use thiserror::Error;

use crate::kv::{KvError, KvStore, Lookup};
use crate::models::Item;

/// Counter holding the last assigned item id
pub const COUNTER_KEY: &str = "itemID";

/// Scan pattern matching every item record
pub const ITEM_KEY_PATTERN: &str = "item:*";

/// Key under which the item with `id` is stored
pub fn item_key(id: u64) -> String {
    format!("item:{}", id)
}

/// Id encoded in an item key, if the key is well formed
fn id_from_key(key: &str) -> Option<u64> {
    key.strip_prefix("item:")?.parse().ok()
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(u64),
    #[error("failed to encode or decode item record: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("key-value store unavailable: {0}")]
    Unavailable(#[from] KvError),
    /// A scanned key disappeared before it could be read
    #[error("key-value store unavailable: {0} was removed while listing items")]
    StaleKey(String),
    #[error("key-value store unavailable: counter itemID returned invalid id {0}")]
    InvalidCounter(i64),
}

/// Item persistence on top of a shared key-value store.
///
/// Holds no local state: every call is a direct round trip, and all
/// coordination between concurrent requests (or service instances) comes from
/// the backend's atomic increment.
#[derive(Clone)]
pub struct ItemStore {
    kv: Arc<dyn KvStore>,
}

impl ItemStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Store a new item under a freshly allocated id.
    ///
    /// Any id on the input is ignored. The counter is bumped before the
    /// record is written, so a failed write leaves a gap in the id sequence.
    pub async fn create(&self, mut item: Item) -> Result<Item, StoreError> {
        item.id = self.next_id().await?;
        self.write(&item).await?;

        tracing::debug!(id = item.id, "Created item");
        Ok(item)
    }

    /// Fetch a single item. The returned id is always the one the record is
    /// keyed under, whatever the record body says.
    pub async fn read(&self, id: u64) -> Result<Item, StoreError> {
        match self.kv.get(&item_key(id)).await? {
            Lookup::Found(bytes) => {
                let mut item: Item = serde_json::from_slice(&bytes)?;
                item.id = id;
                tracing::debug!(id, "Read item");
                Ok(item)
            }
            Lookup::Missing => Err(StoreError::NotFound(id)),
        }
    }

    /// Overwrite the record for `id`, creating it if absent.
    pub async fn update(&self, id: u64, mut item: Item) -> Result<Item, StoreError> {
        item.id = id;
        self.write(&item).await?;

        tracing::debug!(id, "Updated item");
        Ok(item)
    }

    /// Remove the record for `id`. Returns whether a record existed; deleting
    /// an absent item is not an error.
    pub async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let removed = self.kv.delete(&item_key(id)).await? > 0;

        tracing::debug!(id, removed, "Deleted item");
        Ok(removed)
    }

    /// Every stored item, in backend key order.
    ///
    /// Scans the item keyspace and then reads each key in turn. Any failed
    /// read or decode, including a key deleted between the scan and its read,
    /// fails the whole listing.
    pub async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let keys = self.kv.scan(ITEM_KEY_PATTERN).await?;

        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            match self.kv.get(&key).await? {
                Lookup::Found(bytes) => {
                    let mut item: Item = serde_json::from_slice(&bytes)?;
                    if let Some(id) = id_from_key(&key) {
                        item.id = id;
                    }
                    items.push(item);
                }
                Lookup::Missing => return Err(StoreError::StaleKey(key)),
            }
        }

        tracing::debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        Ok(self.kv.ping().await?)
    }

    async fn next_id(&self) -> Result<u64, StoreError> {
        let raw = self.kv.incr(COUNTER_KEY).await?;
        match u64::try_from(raw) {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(StoreError::InvalidCounter(raw)),
        }
    }

    async fn write(&self, item: &Item) -> Result<(), StoreError> {
        // serde_json writes NaN and infinities as null, which would not decode
        if !item.price.is_finite() {
            return Err(StoreError::Encoding(serde::ser::Error::custom(format!(
                "price must be a finite number, got {}",
                item.price
            ))));
        }
        let bytes = serde_json::to_vec(item)?;
        self.kv.set(&item_key(item.id), bytes).await?;
        Ok(())
    }
}
