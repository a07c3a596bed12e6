use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::model::ProductDescriptor;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::{DuplicateDetector, conflicts_with_any};
use crate::domain::product::value_objects::MatchPolicy;

pub struct DuplicateDetectorImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub policy: MatchPolicy,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DuplicateDetector for DuplicateDetectorImpl {
    async fn exists(
        &self,
        candidate: &ProductDescriptor,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, RepositoryError> {
        let rows = self
            .repository
            .find_by_name_and_category(&candidate.name, candidate.category_id, exclude_id)
            .await?;

        let found = conflicts_with_any(candidate, &rows, self.policy);

        self.logger.debug(&format!(
            "Duplicate check for '{}' in category {}: {} candidate rows, conflict={} ({})",
            candidate.name,
            candidate.category_id,
            rows.len(),
            found,
            self.policy
        ));
        Ok(found)
    }
}
