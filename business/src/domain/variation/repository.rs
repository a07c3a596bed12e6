use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::VariationAttributeId;

use super::model::VariationAttribute;

#[async_trait]
pub trait VariationRepository: Send + Sync {
    /// Returns the attributes that exist among `ids`; unknown ids are left out.
    async fn get_attributes_by_ids(
        &self,
        ids: &[VariationAttributeId],
    ) -> Result<Vec<VariationAttribute>, RepositoryError>;
}
