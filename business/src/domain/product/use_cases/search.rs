use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductFilter};

#[async_trait]
pub trait SearchProductsUseCase: Send + Sync {
    async fn execute(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError>;
}
