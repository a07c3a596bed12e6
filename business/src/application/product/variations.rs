use crate::domain::errors::RepositoryError;
use crate::domain::category::repository::CategoryRepository;
use crate::domain::product::errors::ProductError;
use crate::domain::product::value_objects::VariationSelection;
use crate::domain::shared::value_objects::CategoryId;
use crate::domain::variation::repository::VariationRepository;

/// Fails with `CategoryNotFound` unless the category is in the catalog.
pub(crate) async fn ensure_category_exists(
    repository: &dyn CategoryRepository,
    category_id: CategoryId,
) -> Result<(), ProductError> {
    repository
        .get_by_id(category_id)
        .await
        .map(|_| ())
        .map_err(|e| match e {
            RepositoryError::NotFound => ProductError::CategoryNotFound,
            other => ProductError::Repository(other),
        })
}

/// Every chosen attribute must exist and belong to the set it was chosen for.
pub(crate) async fn ensure_attributes_exist(
    repository: &dyn VariationRepository,
    selection: &VariationSelection,
) -> Result<(), ProductError> {
    if selection.is_empty() {
        return Ok(());
    }

    let attributes = repository
        .get_attributes_by_ids(&selection.attribute_ids())
        .await?;

    for link in selection.links() {
        let attribute = attributes
            .iter()
            .find(|a| a.id == link.attribute_id)
            .ok_or(ProductError::VariationAttributeNotFound(link.attribute_id))?;

        if attribute.set_id != link.set_id {
            return Err(ProductError::VariationSetMismatch {
                attribute_id: link.attribute_id,
                expected: link.set_id,
            });
        }
    }

    Ok(())
}
