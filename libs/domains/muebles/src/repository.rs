use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::{MuebleError, MuebleResult};
use crate::models::{Mueble, MuebleFields};
use crate::query::MuebleQuery;

/// Data access for the catalog, keyed by `codigo`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MuebleRepository: Send + Sync {
    /// Matching documents, ordered according to [`MuebleQuery::sort`]
    async fn list(&self, query: MuebleQuery) -> MuebleResult<Vec<Mueble>>;

    async fn get_by_code(&self, code: i64) -> MuebleResult<Option<Mueble>>;

    /// Insert and return the stored document, `id` filled in
    async fn create(&self, mueble: Mueble) -> MuebleResult<Mueble>;

    /// `None` when no document has this code
    async fn update_by_code(&self, code: i64, fields: MuebleFields)
    -> MuebleResult<Option<Mueble>>;

    /// Number of documents removed (0 or 1)
    async fn delete_by_code(&self, code: i64) -> MuebleResult<u64>;
}

/// In-memory implementation of MuebleRepository (for development/testing).
///
/// Keeps insertion order so unsorted listings behave like a fresh collection.
#[derive(Clone, Default)]
pub struct InMemoryMuebleRepository {
    muebles: Arc<RwLock<Vec<Mueble>>>,
}

impl InMemoryMuebleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.muebles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.muebles.read().await.is_empty()
    }
}

#[async_trait]
impl MuebleRepository for InMemoryMuebleRepository {
    async fn list(&self, query: MuebleQuery) -> MuebleResult<Vec<Mueble>> {
        let muebles = self.muebles.read().await;
        Ok(query.apply(muebles.iter()))
    }

    async fn get_by_code(&self, code: i64) -> MuebleResult<Option<Mueble>> {
        let muebles = self.muebles.read().await;
        Ok(muebles.iter().find(|m| m.code == code).cloned())
    }

    async fn create(&self, mut mueble: Mueble) -> MuebleResult<Mueble> {
        let mut muebles = self.muebles.write().await;

        if muebles.iter().any(|m| m.code == mueble.code) {
            return Err(MuebleError::DuplicateCode(mueble.code));
        }

        mueble.id.get_or_insert_with(ObjectId::new);
        muebles.push(mueble.clone());
        Ok(mueble)
    }

    async fn update_by_code(
        &self,
        code: i64,
        fields: MuebleFields,
    ) -> MuebleResult<Option<Mueble>> {
        let mut muebles = self.muebles.write().await;

        Ok(muebles.iter_mut().find(|m| m.code == code).map(|m| {
            m.apply(fields);
            m.clone()
        }))
    }

    async fn delete_by_code(&self, code: i64) -> MuebleResult<u64> {
        let mut muebles = self.muebles.write().await;
        let before = muebles.len();
        muebles.retain(|m| m.code != code);
        Ok((before - muebles.len()) as u64)
    }
}
