use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::{ExistingProduct, Product};
use business::domain::product::value_objects::{VariationLink, VariationSelection};
use business::domain::shared::value_objects::{CategoryId, VariationAttributeId, VariationSetId};

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name: String,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self, links: &[VariationLink]) -> Product {
        Product::from_repository(
            self.id,
            self.name,
            CategoryId::new(self.category_id),
            VariationSelection::from_links(links),
            self.created_at,
            self.updated_at,
        )
    }

    pub fn into_existing(self, links: Vec<VariationLink>) -> ExistingProduct {
        ExistingProduct {
            id: self.id,
            name: self.name,
            category_id: CategoryId::new(self.category_id),
            variation_links: links,
        }
    }
}

/// One row of `product_variation_attributes` joined with its attribute.
#[derive(Debug, FromRow)]
pub struct VariationLinkEntity {
    pub product_id: Uuid,
    pub variation_set_id: i64,
    pub variation_attribute_id: i64,
}

/// Groups link rows by the product they belong to.
pub fn group_links(rows: Vec<VariationLinkEntity>) -> HashMap<Uuid, Vec<VariationLink>> {
    let mut grouped: HashMap<Uuid, Vec<VariationLink>> = HashMap::new();
    for row in rows {
        grouped.entry(row.product_id).or_default().push(VariationLink {
            set_id: VariationSetId::new(row.variation_set_id),
            attribute_id: VariationAttributeId::new(row.variation_attribute_id),
        });
    }
    grouped
}
