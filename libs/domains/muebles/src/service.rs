//! Mueble Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::allocator;
use crate::error::{MuebleError, MuebleResult};
use crate::models::{CreateMueble, Mueble, UpdateMueble};
use crate::query::MuebleQuery;
use crate::repository::MuebleRepository;

/// Validates requests and maps repository outcomes to catalog errors.
pub struct MuebleService<R: MuebleRepository> {
    repository: Arc<R>,
}

impl<R: MuebleRepository> MuebleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_muebles(&self, query: MuebleQuery) -> MuebleResult<Vec<Mueble>> {
        self.repository.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_mueble(&self, code: i64) -> MuebleResult<Mueble> {
        self.repository
            .get_by_code(code)
            .await?
            .ok_or(MuebleError::NotFound(code))
    }

    /// Code for the next insert, computed from a full scan
    #[instrument(skip(self))]
    pub async fn next_code(&self) -> MuebleResult<i64> {
        let muebles = self.repository.list(MuebleQuery::all()).await?;
        Ok(allocator::next_code(&muebles))
    }

    /// Missing fields are rejected before anything touches storage.
    #[instrument(skip(self, input), fields(codigo = ?input.code))]
    pub async fn create_mueble(&self, input: CreateMueble) -> MuebleResult<Mueble> {
        let requested = input.code;
        let fields = input.into_fields()?;

        let code = match requested {
            Some(code) => {
                if self.repository.get_by_code(code).await?.is_some() {
                    return Err(MuebleError::DuplicateCode(code));
                }
                code
            }
            None => self.next_code().await?,
        };

        self.repository.create(Mueble::new(code, fields)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_mueble(&self, code: i64, input: UpdateMueble) -> MuebleResult<Mueble> {
        let fields = input.into_fields()?;

        if self.repository.get_by_code(code).await?.is_none() {
            return Err(MuebleError::NotFound(code));
        }

        // deleted between the lookup and the write
        self.repository
            .update_by_code(code, fields)
            .await?
            .ok_or(MuebleError::NotFound(code))
    }

    #[instrument(skip(self))]
    pub async fn delete_mueble(&self, code: i64) -> MuebleResult<()> {
        match self.repository.delete_by_code(code).await? {
            0 => Err(MuebleError::NotDeleted(code)),
            _ => Ok(()),
        }
    }
}

impl<R: MuebleRepository> Clone for MuebleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuebleFields;
    use crate::repository::MockMuebleRepository;
    use mockall::predicate::eq;

    fn mueble(code: i64) -> Mueble {
        Mueble {
            id: None,
            code,
            name: "Silla".into(),
            price: 50.0,
            category: "sillas".into(),
        }
    }

    fn create_input(code: Option<i64>) -> CreateMueble {
        CreateMueble {
            code,
            name: Some("Silla".into()),
            price: Some(50.0),
            category: Some("sillas".into()),
        }
    }

    #[tokio::test]
    async fn test_create_allocates_next_code() {
        let mut mock_repo = MockMuebleRepository::new();

        mock_repo
            .expect_list()
            .with(eq(MuebleQuery::all()))
            .returning(|_| Ok(vec![mueble(3), mueble(7)]));
        mock_repo
            .expect_create()
            .withf(|m| m.code == 8)
            .returning(Ok);

        let service = MuebleService::new(mock_repo);
        let created = service.create_mueble(create_input(None)).await.unwrap();

        assert_eq!(created.code, 8, "Allocated code should follow the highest code");
    }

    #[tokio::test]
    async fn test_create_with_explicit_code_checks_duplicates() {
        let mut mock_repo = MockMuebleRepository::new();

        mock_repo
            .expect_get_by_code()
            .with(eq(7))
            .returning(|code| Ok(Some(mueble(code))));
        mock_repo.expect_create().never();

        let service = MuebleService::new(mock_repo);
        let result = service.create_mueble(create_input(Some(7))).await;

        assert!(matches!(result, Err(MuebleError::DuplicateCode(7))));
    }

    #[tokio::test]
    async fn test_create_missing_fields_performs_no_io() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo.expect_list().never();
        mock_repo.expect_create().never();

        let service = MuebleService::new(mock_repo);
        let input = CreateMueble {
            name: Some("Silla".into()),
            ..Default::default()
        };

        assert!(matches!(
            service.create_mueble(input).await,
            Err(MuebleError::MissingFields(_))
        ));
    }

    #[tokio::test]
    async fn test_get_unknown_code_is_not_found() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo.expect_get_by_code().returning(|_| Ok(None));

        let service = MuebleService::new(mock_repo);

        assert!(matches!(
            service.get_mueble(42).await,
            Err(MuebleError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_code_skips_write() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo.expect_get_by_code().returning(|_| Ok(None));
        mock_repo.expect_update_by_code().never();

        let service = MuebleService::new(mock_repo);
        let input = UpdateMueble {
            name: Some("Mesa".into()),
            price: Some(10.0),
            category: Some("mesas".into()),
        };

        assert!(matches!(
            service.update_mueble(9, input).await,
            Err(MuebleError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_update_writes_validated_fields() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo
            .expect_get_by_code()
            .returning(|code| Ok(Some(mueble(code))));
        mock_repo
            .expect_update_by_code()
            .with(
                eq(2),
                eq(MuebleFields {
                    name: "Mesa".into(),
                    price: 0.0,
                    category: "mesas".into(),
                }),
            )
            .returning(|code, fields| Ok(Some(Mueble::new(code, fields))));

        let service = MuebleService::new(mock_repo);
        let input = UpdateMueble {
            name: Some("Mesa".into()),
            price: Some(0.0),
            category: Some("mesas".into()),
        };

        let updated = service.update_mueble(2, input).await.unwrap();
        assert_eq!(updated.name, "Mesa");
    }

    #[tokio::test]
    async fn test_delete_nothing_is_not_deleted() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo.expect_delete_by_code().returning(|_| Ok(0));

        let service = MuebleService::new(mock_repo);

        assert!(matches!(
            service.delete_mueble(5).await,
            Err(MuebleError::NotDeleted(5))
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockMuebleRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(MuebleError::Database("connection reset".into())));

        let service = MuebleService::new(mock_repo);
        let err = service.list_muebles(MuebleQuery::all()).await.unwrap_err();

        assert!(!err.is_client_error());
    }
}
