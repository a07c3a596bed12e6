use std::collections::HashSet;

use super::errors::ProductError;
use crate::domain::shared::value_objects::{VariationAttributeId, VariationSetId};

pub const NAME_MAX_LENGTH: usize = 255;

/// A single failed rule on an input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, code: &'static str) -> Self {
        Self { field, code }
    }
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new("name", "product.name_empty"));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(FieldError::new("name", "product.name_too_long"));
    }
    Ok(())
}

/// Checks raw product input before any lookup runs.
///
/// Every failing field is reported, not only the first one.
pub fn validate_product(
    name: &str,
    choices: &[(VariationSetId, Option<VariationAttributeId>)],
) -> Result<(), ProductError> {
    let mut errors = Vec::new();

    if let Err(error) = validate_name(name) {
        errors.push(error);
    }

    let mut seen = HashSet::new();
    let repeated = choices
        .iter()
        .filter(|(_, attribute_id)| attribute_id.is_some())
        .any(|(set_id, _)| !seen.insert(*set_id));
    if repeated {
        errors.push(FieldError::new(
            "variations",
            "product.duplicate_variation_set",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProductError::Validation(errors))
    }
}
