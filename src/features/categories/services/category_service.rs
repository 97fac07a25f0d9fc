use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::repositories::CategoryRepository;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Category with id {} not found", id))
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List every category
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repository.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        if dto.name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        let category = self.repository.create(dto.into()).await?;
        tracing::info!("Category {} created", category.id);
        Ok(category.into())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CategoryResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Update the fields present in `dto`, leaving the others unchanged
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if dto.name.as_deref() == Some("") {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        self.repository
            .update(id, dto.into())
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Hard delete
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Category {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryCategoryRepository;

    fn service() -> (CategoryService, Arc<InMemoryCategoryRepository>) {
        let repository = Arc::new(InMemoryCategoryRepository::default());
        (CategoryService::new(repository.clone()), repository)
    }

    fn create_dto(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_record() {
        let (service, _) = service();
        let created = service
            .create(CreateCategoryDto {
                name: "Books".to_string(),
                description: Some("Paper and ink".to_string()),
            })
            .await
            .unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "Books");
        assert_eq!(fetched.description.as_deref(), Some("Paper and ink"));
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_create_with_empty_name_persists_nothing() {
        let (service, repository) = service();
        let err = service.create(create_dto("")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repository.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found_and_mutates_nothing() {
        let (service, repository) = service();
        let existing = service.create(create_dto("Music")).await.unwrap();

        let err = service
            .update(
                existing.id + 100,
                UpdateCategoryDto {
                    name: Some("Changed".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repository.len().await, 1);
        assert_eq!(service.get_by_id(existing.id).await.unwrap().name, "Music");
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let (service, _) = service();
        let created = service
            .create(CreateCategoryDto {
                name: "Games".to_string(),
                description: Some("Board and video".to_string()),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateCategoryDto {
                    name: Some("Toys & Games".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Toys & Games");
        assert_eq!(updated.description.as_deref(), Some("Board and video"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _) = service();
        let created = service.create(create_dto("Garden")).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_database_error() {
        let repository = Arc::new(InMemoryCategoryRepository::failing());
        let service = CategoryService::new(repository);

        assert!(matches!(service.list().await, Err(AppError::Database(_))));
    }
}
