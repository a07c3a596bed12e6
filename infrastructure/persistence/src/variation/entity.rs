use sqlx::FromRow;

use business::domain::shared::value_objects::{VariationAttributeId, VariationSetId};
use business::domain::variation::model::VariationAttribute;

#[derive(Debug, FromRow)]
pub struct VariationAttributeEntity {
    pub id: i64,
    pub variation_set_id: i64,
    pub name: String,
}

impl VariationAttributeEntity {
    pub fn into_domain(self) -> VariationAttribute {
        VariationAttribute {
            id: VariationAttributeId::new(self.id),
            set_id: VariationSetId::new(self.variation_set_id),
            name: self.name,
        }
    }
}
