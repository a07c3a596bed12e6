use crate::domain::shared::value_objects::CategoryId;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
