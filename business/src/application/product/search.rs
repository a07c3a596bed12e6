use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductFilter};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::search::SearchProductsUseCase;

pub struct SearchProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchProductsUseCase for SearchProductsUseCaseImpl {
    async fn execute(&self, mut filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        // A blank name box means "no name filter".
        filter.name = filter
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        self.logger.info(&format!("Searching products: {:?}", filter));
        let products = self.repository.search(&filter).await?;
        self.logger.info(&format!("Found {} products", products.len()));
        Ok(products)
    }
}
