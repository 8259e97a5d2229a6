use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Record, Repository};
use crate::errors::AppError;

/// Process-local store. Contents are lost on restart.
pub struct InMemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn insert(&self, record: T) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    async fn update(&self, record: T) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}
