//! MongoDB implementation of MuebleRepository

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use database::mongodb::{Collection, MongoConnector};
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{MuebleError, MuebleResult};
use crate::models::{COLLECTION, Mueble, MuebleFields};
use crate::query::{MuebleQuery, PriceRange, SortOrder};
use crate::repository::MuebleRepository;

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the MuebleRepository.
///
/// Every operation acquires a handle from the connector and gives it back
/// afterwards, so the same repository works with a shared pool or with a
/// connection per request.
#[derive(Clone)]
pub struct MongoMuebleRepository {
    connector: Arc<dyn MongoConnector>,
}

impl MongoMuebleRepository {
    pub fn new(connector: Arc<dyn MongoConnector>) -> Self {
        Self { connector }
    }

    /// Unique index on `codigo`; safe to call on every start.
    #[instrument(skip(self))]
    pub async fn ensure_indexes(&self) -> MuebleResult<()> {
        self.with_collection(|collection| async move {
            let index = IndexModel::builder()
                .keys(doc! { "codigo": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("codigo_unique".to_string())
                        .build(),
                )
                .build();
            collection.create_index(index).await.map(|_| ())
        })
        .await?;

        tracing::info!(collection = COLLECTION, "MongoDB indexes ensured");
        Ok(())
    }

    async fn with_collection<T, E, F, Fut>(&self, op: F) -> MuebleResult<T>
    where
        F: FnOnce(Collection<Mueble>) -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Send,
        MuebleError: From<E>,
    {
        let handle = self.connector.connect().await?;
        let collection = handle.database().collection::<Mueble>(COLLECTION);

        let result = op(collection).await;
        self.connector.disconnect(handle).await;

        result.map_err(MuebleError::from)
    }

    fn build_filter(query: &MuebleQuery) -> Document {
        let mut filter = doc! {};

        if let Some(ref category) = query.category {
            filter.insert("categoria", category);
        }

        if let Some(range) = query.price {
            filter.insert("precio", Self::price_bounds(range));
        }

        filter
    }

    fn price_bounds(range: PriceRange) -> Document {
        let mut bounds = doc! {};
        if let Some(min) = range.min() {
            bounds.insert("$gte", min);
        }
        if let Some(max) = range.max() {
            bounds.insert("$lte", max);
        }
        bounds
    }

    fn build_sort(order: SortOrder) -> Document {
        match order {
            SortOrder::PriceDescending => doc! { "precio": -1 },
            SortOrder::NameAscending => doc! { "nombre": 1 },
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl MuebleRepository for MongoMuebleRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: MuebleQuery) -> MuebleResult<Vec<Mueble>> {
        let filter = Self::build_filter(&query);
        let sort = query.sort().map(Self::build_sort);

        self.with_collection(|collection| async move {
            let mut find = collection.find(filter);
            if let Some(sort) = sort {
                find = find.sort(sort);
            }
            let cursor = find.await?;
            cursor.try_collect::<Vec<Mueble>>().await
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_code(&self, code: i64) -> MuebleResult<Option<Mueble>> {
        self.with_collection(|collection| async move {
            collection.find_one(doc! { "codigo": code }).await
        })
        .await
    }

    #[instrument(skip(self, mueble), fields(codigo = mueble.code))]
    async fn create(&self, mut mueble: Mueble) -> MuebleResult<Mueble> {
        let code = mueble.code;

        let created = self
            .with_collection(|collection| async move {
                match collection.insert_one(&mueble).await {
                    Ok(result) => {
                        mueble.id = result.inserted_id.as_object_id();
                        Ok(mueble)
                    }
                    Err(e) if is_duplicate_key(&e) => Err(MuebleError::DuplicateCode(code)),
                    Err(e) => Err(MuebleError::from(e)),
                }
            })
            .await?;

        tracing::info!(codigo = code, "Mueble created successfully");
        Ok(created)
    }

    #[instrument(skip(self, fields))]
    async fn update_by_code(
        &self,
        code: i64,
        fields: MuebleFields,
    ) -> MuebleResult<Option<Mueble>> {
        let update = doc! {
            "$set": {
                "nombre": fields.name,
                "precio": fields.price,
                "categoria": fields.category,
            }
        };

        self.with_collection(|collection| async move {
            collection
                .find_one_and_update(doc! { "codigo": code }, update)
                .return_document(ReturnDocument::After)
                .await
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_by_code(&self, code: i64) -> MuebleResult<u64> {
        self.with_collection(|collection| async move {
            collection
                .delete_one(doc! { "codigo": code })
                .await
                .map(|result| result.deleted_count)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty_query() {
        assert_eq!(
            MongoMuebleRepository::build_filter(&MuebleQuery::all()),
            doc! {}
        );
    }

    #[test]
    fn test_build_filter_price_between() {
        let query = MuebleQuery::new(None, Some(10.0), Some(100.0));

        assert_eq!(
            MongoMuebleRepository::build_filter(&query),
            doc! { "precio": { "$gte": 10.0, "$lte": 100.0 } }
        );
        assert_eq!(
            query.sort().map(MongoMuebleRepository::build_sort),
            Some(doc! { "precio": -1 })
        );
    }

    #[test]
    fn test_build_filter_category_with_upper_bound() {
        let query = MuebleQuery::new(Some("sillas".into()), None, Some(100.0));

        assert_eq!(
            MongoMuebleRepository::build_filter(&query),
            doc! { "categoria": "sillas", "precio": { "$lte": 100.0 } }
        );
        assert_eq!(
            query.sort().map(MongoMuebleRepository::build_sort),
            Some(doc! { "nombre": 1 })
        );
    }

    #[test]
    fn test_build_sort_price_descending() {
        let query = MuebleQuery::new(None, None, Some(100.0));

        assert_eq!(
            query.sort().map(MongoMuebleRepository::build_sort),
            Some(doc! { "precio": -1 })
        );
    }
}
