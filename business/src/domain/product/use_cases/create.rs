use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::{CategoryId, VariationAttributeId, VariationSetId};

pub struct CreateProductParams {
    pub name: String,
    pub category_id: CategoryId,
    /// One entry per variation set shown on the form; `None` when left blank.
    pub variations: Vec<(VariationSetId, Option<VariationAttributeId>)>,
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError>;
}
