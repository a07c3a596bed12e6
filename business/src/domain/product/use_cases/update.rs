use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::{CategoryId, VariationAttributeId, VariationSetId};

pub struct UpdateProductParams {
    pub id: Uuid,
    pub name: String,
    pub category_id: CategoryId,
    /// Replaces the product's whole selection; `None` entries are dropped.
    pub variations: Vec<(VariationSetId, Option<VariationAttributeId>)>,
}

#[async_trait]
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError>;
}
