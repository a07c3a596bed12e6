use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::{ExistingProduct, ProductDescriptor};
use super::value_objects::MatchPolicy;

/// Service port deciding whether a product collides with one already in the
/// catalog.
///
/// The check is a plain read. Two concurrent writers can both pass it for
/// the same product; nothing here serializes them.
#[async_trait]
pub trait DuplicateDetector: Send + Sync {
    /// Returns true when a product other than `exclude_id` has the same
    /// name, category and variation selection as `candidate`.
    async fn exists(
        &self,
        candidate: &ProductDescriptor,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, RepositoryError>;
}

/// Decides a conflict from rows already filtered by name and category.
///
/// Under `SortedValues` an empty candidate conflicts with any row, matching
/// the legacy behavior. Under `KeyWise` it only conflicts with rows that
/// have no variations either.
pub fn conflicts_with_any(
    candidate: &ProductDescriptor,
    rows: &[ExistingProduct],
    policy: MatchPolicy,
) -> bool {
    if policy == MatchPolicy::SortedValues && candidate.variations.is_empty() {
        return !rows.is_empty();
    }

    rows.iter()
        .any(|row| candidate.variations.matches(&row.selection(), policy))
}
