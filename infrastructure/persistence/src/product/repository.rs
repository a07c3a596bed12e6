use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{ExistingProduct, Product, ProductFilter};
use business::domain::product::repository::ProductRepository;
use business::domain::product::value_objects::VariationLink;
use business::domain::shared::value_objects::{CategoryId, VariationAttributeId};

use super::entity::{ProductEntity, VariationLinkEntity, group_links};
use crate::db::map_sqlx_error;

const PRODUCT_COLUMNS: &str = "id, name, category_id, created_at, updated_at";

const UPSERT_PRODUCT: &str = r#"INSERT INTO products (id, name, category_id, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (id) DO UPDATE SET
        name = EXCLUDED.name,
        category_id = EXCLUDED.category_id,
        updated_at = EXCLUDED.updated_at"#;

const INSERT_LINK: &str = r#"INSERT INTO product_variation_attributes (product_id, variation_attribute_id)
    VALUES ($1, $2)
    ON CONFLICT DO NOTHING"#;

const DELETE_LINKS: &str = "DELETE FROM product_variation_attributes WHERE product_id = $1";

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the link records of all given products in one query.
    async fn load_links(
        &self,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<VariationLink>>, RepositoryError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, VariationLinkEntity>(
            r#"SELECT pva.product_id, va.variation_set_id, va.id AS variation_attribute_id
            FROM product_variation_attributes pva
            JOIN variation_attributes va ON va.id = pva.variation_attribute_id
            WHERE pva.product_id = ANY($1)
            ORDER BY va.variation_set_id"#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(group_links(rows))
    }

    async fn with_links(&self, entities: Vec<ProductEntity>) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let links = self.load_links(&ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let product_links = links.get(&e.id).map(Vec::as_slice).unwrap_or_default();
                e.into_domain(product_links)
            })
            .collect())
    }
}

/// Escapes LIKE wildcards so user input only matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"));

        if let Some(name) = &filter.name {
            builder
                .push(" AND name ILIKE ")
                .push_bind(format!("%{}%", escape_like(name)));
        }
        if let Some(category_id) = filter.category_id {
            builder
                .push(" AND category_id = ")
                .push_bind(category_id.value());
        }
        builder.push(" ORDER BY name, created_at DESC");

        let entities = builder
            .build_query_as::<ProductEntity>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        self.with_links(entities).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        let links = self.load_links(&[id]).await?;
        let product_links = links.get(&id).map(Vec::as_slice).unwrap_or_default();
        Ok(entity.into_domain(product_links))
    }

    async fn find_by_name_and_category(
        &self,
        name: &str,
        category_id: CategoryId,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<ExistingProduct>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
            WHERE name = $1 AND category_id = $2 AND ($3::uuid IS NULL OR id <> $3)"
        ))
        .bind(name)
        .bind(category_id.value())
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let mut links = self.load_links(&ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let product_links = links.remove(&e.id).unwrap_or_default();
                e.into_existing(product_links)
            })
            .collect())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(UPSERT_PRODUCT)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.category_id.value())
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn add_variation_link(
        &self,
        product_id: Uuid,
        attribute_id: VariationAttributeId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(INSERT_LINK)
            .bind(product_id)
            .bind(attribute_id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn clear_variation_links(&self, product_id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query(DELETE_LINKS)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn save_with_links(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(UPSERT_PRODUCT)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.category_id.value())
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query(DELETE_LINKS)
            .bind(product.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        for link in product.variations.links() {
            sqlx::query(INSERT_LINK)
                .bind(product.id)
                .bind(link.attribute_id.value())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        // Dropping the transaction without commit rolls it back.
        tx.commit().await.map_err(map_sqlx_error)
    }
}
