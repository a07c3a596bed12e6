use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::{CategoryId, VariationAttributeId};

use super::model::{ExistingProduct, Product, ProductFilter};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Products with exactly this name and category, each with its link
    /// records loaded. `exclude_id` leaves one product out of the result.
    async fn find_by_name_and_category(
        &self,
        name: &str,
        category_id: CategoryId,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<ExistingProduct>, RepositoryError>;
    /// Inserts or updates the product row. Variation links are not touched.
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn add_variation_link(
        &self,
        product_id: Uuid,
        attribute_id: VariationAttributeId,
    ) -> Result<(), RepositoryError>;
    async fn clear_variation_links(&self, product_id: Uuid) -> Result<(), RepositoryError>;

    /// Writes the product row and replaces its variation links with the
    /// product's current selection. The default runs the single-step
    /// operations one after another; adapters with transactions override it
    /// so a failure leaves nothing half written.
    async fn save_with_links(&self, product: &Product) -> Result<(), RepositoryError> {
        self.save(product).await?;
        self.clear_variation_links(product.id).await?;
        for link in product.variations.links() {
            self.add_variation_link(product.id, link.attribute_id).await?;
        }
        Ok(())
    }
}
