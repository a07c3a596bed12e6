use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ProductError;
use super::validation;
use super::value_objects::{VariationLink, VariationSelection};
use crate::domain::shared::value_objects::CategoryId;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: CategoryId,
    pub variations: VariationSelection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProductProps {
    pub name: String,
    pub category_id: CategoryId,
    pub variations: VariationSelection,
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        validation::validate_name(&props.name)
            .map_err(|error| ProductError::Validation(vec![error]))?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: props.name,
            category_id: props.category_id,
            variations: props.variations,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        name: String,
        category_id: CategoryId,
        variations: VariationSelection,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            category_id,
            variations,
            created_at,
            updated_at,
        }
    }

    pub fn descriptor(&self) -> ProductDescriptor {
        ProductDescriptor {
            name: self.name.clone(),
            category_id: self.category_id,
            variations: self.variations.clone(),
        }
    }
}

/// Transient description of a product being created or updated, checked
/// against the catalog before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDescriptor {
    pub name: String,
    pub category_id: CategoryId,
    pub variations: VariationSelection,
}

/// Catalog row returned by the duplicate lookup, with its link records.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingProduct {
    pub id: Uuid,
    pub name: String,
    pub category_id: CategoryId,
    pub variation_links: Vec<VariationLink>,
}

impl ExistingProduct {
    pub fn selection(&self) -> VariationSelection {
        VariationSelection::from_links(&self.variation_links)
    }
}

/// Search filter for the product listing. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}
