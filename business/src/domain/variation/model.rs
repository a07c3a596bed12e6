use crate::domain::shared::value_objects::{VariationAttributeId, VariationSetId};

/// A concrete value of a variation set, e.g. "Red" in "Color".
#[derive(Debug, Clone, PartialEq)]
pub struct VariationAttribute {
    pub id: VariationAttributeId,
    pub set_id: VariationSetId,
    pub name: String,
}
