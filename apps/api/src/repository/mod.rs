//! Storage capability for candidates and requests.
//!
//! Handlers only see `Arc<dyn Repository<T>>`; the backend is picked at startup
//! (`InMemoryStore` by default, `PgStore` when `DATABASE_URL` is set).

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Candidate, Rfp};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Anything stored by id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for Candidate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Rfp {
    fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<T>, AppError>;

    async fn get(&self, id: &str) -> Result<Option<T>, AppError>;

    /// Adds a new record. Returns `false`, storing nothing, when the id is already taken.
    async fn insert(&self, record: T) -> Result<bool, AppError>;

    /// Replaces the record with the same id in place. Returns `false` when no such record exists.
    async fn update(&self, record: T) -> Result<bool, AppError>;

    /// Returns `true` when a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// Fetches every id in `ids`, in the given order, failing on the first unknown id.
pub async fn get_all<T: Record>(
    repo: &dyn Repository<T>,
    ids: &[String],
    kind: &str,
) -> Result<Vec<T>, AppError> {
    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        let record = repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{kind} {id} not found")))?;
        records.push(record);
    }
    Ok(records)
}
