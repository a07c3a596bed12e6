use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::VariationAttributeId;
use business::domain::variation::model::VariationAttribute;
use business::domain::variation::repository::VariationRepository;

use super::entity::VariationAttributeEntity;
use crate::db::map_sqlx_error;

pub struct VariationRepositoryPostgres {
    pool: PgPool,
}

impl VariationRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VariationRepository for VariationRepositoryPostgres {
    async fn get_attributes_by_ids(
        &self,
        ids: &[VariationAttributeId],
    ) -> Result<Vec<VariationAttribute>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        let entities = sqlx::query_as::<_, VariationAttributeEntity>(
            "SELECT id, variation_set_id, name FROM variation_attributes WHERE id = ANY($1)",
        )
        .bind(raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }
}
