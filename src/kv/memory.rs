use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{KvError, KvStore, Lookup};

/// In-process key-value backend mirroring the Redis semantics the item store
/// relies on. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent command fail with a connection error until
    /// switched back.
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), KvError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(KvError::Connection("in-memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Lookup, KvError> {
        self.check_online()?;
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned().into())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), KvError> {
        self.check_online()?;
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, KvError> {
        self.check_online()?;
        let removed = self.entries.lock().await.remove(key);
        Ok(u64::from(removed.is_some()))
    }

    async fn incr(&self, key: &str) -> Result<i64, KvError> {
        self.check_online()?;
        let mut entries = self.entries.lock().await;

        let current = match entries.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| {
                    KvError::Command("value is not an integer or out of range".to_string())
                })?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| KvError::Command("increment would overflow".to_string()))?;

        entries.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        self.check_online()?;
        let entries = self.entries.lock().await;
        Ok(entries
            .keys()
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes()))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), KvError> {
        self.check_online()
    }
}

/// Redis-style glob matching supporting `*` and `?`.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == b'?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
