use crate::domain::shared::value_objects::{VariationAttributeId, VariationSetId};

use super::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.validation_failed")]
    Validation(Vec<FieldError>),
    #[error("product.not_found")]
    NotFound,
    #[error("product.category_not_found")]
    CategoryNotFound,
    #[error("product.already_exists")]
    AlreadyExists,
    #[error("product.duplicate_variation_set")]
    DuplicateVariationSet(VariationSetId),
    #[error("product.variation_attribute_not_found")]
    VariationAttributeNotFound(VariationAttributeId),
    #[error("product.variation_set_mismatch")]
    VariationSetMismatch {
        attribute_id: VariationAttributeId,
        expected: VariationSetId,
    },
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
