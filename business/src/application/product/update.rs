use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::repository::CategoryRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductDescriptor};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::DuplicateDetector;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use crate::domain::product::validation;
use crate::domain::product::value_objects::VariationSelection;
use crate::domain::variation::repository::VariationRepository;

use super::variations::{ensure_attributes_exist, ensure_category_exists};

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub category_repository: Arc<dyn CategoryRepository>,
    pub variation_repository: Arc<dyn VariationRepository>,
    pub detector: Arc<dyn DuplicateDetector>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        self.logger.info(&format!("Updating product: {}", params.id));

        // Verify product exists
        let existing = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })?;

        validation::validate_product(&params.name, &params.variations)?;
        ensure_category_exists(self.category_repository.as_ref(), params.category_id).await?;

        let variations = VariationSelection::from_choices(params.variations)?;
        ensure_attributes_exist(self.variation_repository.as_ref(), &variations).await?;

        let candidate = ProductDescriptor {
            name: params.name,
            category_id: params.category_id,
            variations,
        };
        if self.detector.exists(&candidate, Some(existing.id)).await? {
            self.logger.warn(&format!(
                "Update of {} would duplicate another product: {} (category {})",
                existing.id, candidate.name, candidate.category_id
            ));
            return Err(ProductError::AlreadyExists);
        }

        let updated_product = Product::from_repository(
            existing.id,
            candidate.name,
            candidate.category_id,
            candidate.variations,
            existing.created_at,
            chrono::Utc::now(),
        );

        // Links are replaced, never merged.
        self.repository.save_with_links(&updated_product).await?;

        self.logger.info(&format!("Product updated: {}", updated_product.id));
        Ok(updated_product)
    }
}
