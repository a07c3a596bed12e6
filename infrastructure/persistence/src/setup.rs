use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use logger::TracingLogger;

use business::application::category::get_all::GetAllCategoriesUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::duplicate_detector::DuplicateDetectorImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::search::SearchProductsUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;
use business::domain::category::use_cases::get_all::GetAllCategoriesUseCase;
use business::domain::product::services::DuplicateDetector;
use business::domain::product::use_cases::create::CreateProductUseCase;
use business::domain::product::use_cases::delete::DeleteProductUseCase;
use business::domain::product::use_cases::get_by_id::GetProductByIdUseCase;
use business::domain::product::use_cases::search::SearchProductsUseCase;
use business::domain::product::use_cases::update::UpdateProductUseCase;
use business::domain::product::value_objects::MatchPolicy;

use crate::category::repository::CategoryRepositoryPostgres;
use crate::config::CatalogConfig;
use crate::db::{create_postgres_pool, run_migrations};
use crate::product::repository::ProductRepositoryPostgres;
use crate::variation::repository::VariationRepositoryPostgres;

/// Use cases wired to their PostgreSQL adapters.
pub struct CatalogContainer {
    pub create_product: Arc<dyn CreateProductUseCase>,
    pub update_product: Arc<dyn UpdateProductUseCase>,
    pub delete_product: Arc<dyn DeleteProductUseCase>,
    pub get_product: Arc<dyn GetProductByIdUseCase>,
    pub search_products: Arc<dyn SearchProductsUseCase>,
    pub get_categories: Arc<dyn GetAllCategoriesUseCase>,
    pub duplicate_detector: Arc<dyn DuplicateDetector>,
}

impl CatalogContainer {
    /// Connects, migrates and wires everything from a loaded configuration.
    pub async fn connect(config: &CatalogConfig) -> anyhow::Result<Self> {
        let pool = create_postgres_pool(&config.database)
            .await
            .context("could not connect to the catalog database")?;
        run_migrations(&pool, &config.migrations_path)
            .await
            .with_context(|| format!("could not migrate from {}", config.migrations_path))?;

        tracing::info!(policy = %config.match_policy, "catalog ready");
        Ok(Self::new(pool, config.match_policy))
    }

    pub fn new(pool: PgPool, match_policy: MatchPolicy) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let category_repository = Arc::new(CategoryRepositoryPostgres::new(pool.clone()));
        let variation_repository = Arc::new(VariationRepositoryPostgres::new(pool));

        let duplicate_detector = Arc::new(DuplicateDetectorImpl {
            repository: product_repository.clone(),
            policy: match_policy,
            logger: logger.clone(),
        });

        // Product use cases
        let create_product = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            category_repository: category_repository.clone(),
            variation_repository: variation_repository.clone(),
            detector: duplicate_detector.clone(),
            logger: logger.clone(),
        });
        let update_product = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            category_repository: category_repository.clone(),
            variation_repository,
            detector: duplicate_detector.clone(),
            logger: logger.clone(),
        });
        let delete_product = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_product = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let search_products = Arc::new(SearchProductsUseCaseImpl {
            repository: product_repository,
            logger: logger.clone(),
        });

        // Category use cases
        let get_categories = Arc::new(GetAllCategoriesUseCaseImpl {
            repository: category_repository,
            logger,
        });

        Self {
            create_product,
            update_product,
            delete_product,
            get_product,
            search_products,
            get_categories,
            duplicate_detector,
        }
    }
}
