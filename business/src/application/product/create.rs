use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::repository::CategoryRepository;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{NewProductProps, Product, ProductDescriptor};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::DuplicateDetector;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use crate::domain::product::validation;
use crate::domain::product::value_objects::VariationSelection;
use crate::domain::variation::repository::VariationRepository;

use super::variations::{ensure_attributes_exist, ensure_category_exists};

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub category_repository: Arc<dyn CategoryRepository>,
    pub variation_repository: Arc<dyn VariationRepository>,
    pub detector: Arc<dyn DuplicateDetector>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger.info(&format!(
            "Creating product: {} (category {})",
            params.name, params.category_id
        ));

        validation::validate_product(&params.name, &params.variations)?;
        ensure_category_exists(self.category_repository.as_ref(), params.category_id).await?;

        let variations = VariationSelection::from_choices(params.variations)?;
        ensure_attributes_exist(self.variation_repository.as_ref(), &variations).await?;

        let candidate = ProductDescriptor {
            name: params.name,
            category_id: params.category_id,
            variations,
        };
        if self.detector.exists(&candidate, None).await? {
            self.logger.warn(&format!(
                "Product already exists: {} (category {})",
                candidate.name, candidate.category_id
            ));
            return Err(ProductError::AlreadyExists);
        }

        let product = Product::new(NewProductProps {
            name: candidate.name,
            category_id: candidate.category_id,
            variations: candidate.variations,
        })?;

        self.repository.save_with_links(&product).await?;

        self.logger.info(&format!("Product created with id: {}", product.id));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::model::Category;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::{ExistingProduct, ProductFilter};
    use crate::domain::product::validation::FieldError;
    use crate::domain::shared::value_objects::{
        CategoryId, VariationAttributeId, VariationSetId,
    };
    use crate::domain::variation::model::VariationAttribute;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
            async fn find_by_name_and_category(&self, name: &str, category_id: CategoryId, exclude_id: Option<Uuid>) -> Result<Vec<ExistingProduct>, RepositoryError>;
            async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
            async fn add_variation_link(&self, product_id: Uuid, attribute_id: VariationAttributeId) -> Result<(), RepositoryError>;
            async fn clear_variation_links(&self, product_id: Uuid) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub CategoryRepo {}

        #[async_trait]
        impl CategoryRepository for CategoryRepo {
            async fn get_all(&self) -> Result<Vec<Category>, RepositoryError>;
            async fn get_by_id(&self, id: CategoryId) -> Result<Category, RepositoryError>;
        }
    }

    mock! {
        pub VariationRepo {}

        #[async_trait]
        impl VariationRepository for VariationRepo {
            async fn get_attributes_by_ids(&self, ids: &[VariationAttributeId]) -> Result<Vec<VariationAttribute>, RepositoryError>;
        }
    }

    mock! {
        pub Detector {}

        #[async_trait]
        impl DuplicateDetector for Detector {
            async fn exists(&self, candidate: &ProductDescriptor, exclude_id: Option<Uuid>) -> Result<bool, RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn existing_category() -> MockCategoryRepo {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_by_id().returning(|id| {
            Ok(Category {
                id,
                name: "Tools".to_string(),
            })
        });
        repo
    }

    /// Attributes 10 and 11 belong to set 1, attribute 20 to set 2.
    fn known_attributes() -> MockVariationRepo {
        let mut repo = MockVariationRepo::new();
        repo.expect_get_attributes_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .filter_map(|id| {
                    let set_id = match id.value() {
                        10 | 11 => 1,
                        20 => 2,
                        _ => return None,
                    };
                    Some(VariationAttribute {
                        id: *id,
                        set_id: VariationSetId::new(set_id),
                        name: format!("attribute-{}", id),
                    })
                })
                .collect())
        });
        repo
    }

    fn choice(set: i64, attribute: Option<i64>) -> (VariationSetId, Option<VariationAttributeId>) {
        (
            VariationSetId::new(set),
            attribute.map(VariationAttributeId::new),
        )
    }

    fn params(variations: Vec<(VariationSetId, Option<VariationAttributeId>)>) -> CreateProductParams {
        CreateProductParams {
            name: "Widget".to_string(),
            category_id: CategoryId::new(1),
            variations,
        }
    }

    #[tokio::test]
    async fn should_create_product_and_link_chosen_variations() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_save().times(1).returning(|_| Ok(()));
        mock_repo
            .expect_clear_variation_links()
            .times(1)
            .returning(|_| Ok(()));
        mock_repo
            .expect_add_variation_link()
            .withf(|_, attribute_id| {
                *attribute_id == VariationAttributeId::new(10)
                    || *attribute_id == VariationAttributeId::new(20)
            })
            .times(2)
            .returning(|_, _| Ok(()));

        let mut detector = MockDetector::new();
        detector
            .expect_exists()
            .withf(|candidate, exclude_id| candidate.variations.len() == 2 && exclude_id.is_none())
            .times(1)
            .returning(|_, _| Ok(false));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(params(vec![
                choice(1, Some(10)),
                choice(2, Some(20)),
                choice(3, None),
            ]))
            .await;

        let product = result.unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.category_id, CategoryId::new(1));
        assert_eq!(
            product.variations.attribute_ids(),
            vec![VariationAttributeId::new(10), VariationAttributeId::new(20)]
        );
    }

    #[tokio::test]
    async fn should_create_product_without_variations() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_save().times(1).returning(|_| Ok(()));
        mock_repo.expect_clear_variation_links().returning(|_| Ok(()));
        mock_repo.expect_add_variation_link().never();

        let mut variation_repo = MockVariationRepo::new();
        variation_repo.expect_get_attributes_by_ids().never();

        let mut detector = MockDetector::new();
        detector.expect_exists().returning(|_, _| Ok(false));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(variation_repo),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(vec![])).await;

        assert!(result.unwrap().variations.is_empty());
    }

    #[tokio::test]
    async fn should_reject_duplicate_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_save().never();
        mock_repo.expect_add_variation_link().never();

        let mut detector = MockDetector::new();
        detector.expect_exists().returning(|_, _| Ok(true));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(vec![choice(1, Some(10))])).await;

        assert!(matches!(result.unwrap_err(), ProductError::AlreadyExists));
    }

    #[tokio::test]
    async fn should_reject_unknown_category() {
        let mut category_repo = MockCategoryRepo::new();
        category_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let mut detector = MockDetector::new();
        detector.expect_exists().never();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(MockProductRepo::new()),
            category_repository: Arc::new(category_repo),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(vec![])).await;

        assert!(matches!(result.unwrap_err(), ProductError::CategoryNotFound));
    }

    #[tokio::test]
    async fn should_reject_empty_name_before_any_lookup() {
        let mut category_repo = MockCategoryRepo::new();
        category_repo.expect_get_by_id().never();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(MockProductRepo::new()),
            category_repository: Arc::new(category_repo),
            variation_repository: Arc::new(MockVariationRepo::new()),
            detector: Arc::new(MockDetector::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(CreateProductParams {
                name: "".to_string(),
                category_id: CategoryId::new(1),
                variations: vec![],
            })
            .await;

        match result.unwrap_err() {
            ProductError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("name", "product.name_empty")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_reject_unknown_variation_attribute() {
        let mut detector = MockDetector::new();
        detector.expect_exists().never();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(MockProductRepo::new()),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(vec![choice(1, Some(99))])).await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::VariationAttributeNotFound(id) if id == VariationAttributeId::new(99)
        ));
    }

    #[tokio::test]
    async fn should_reject_attribute_chosen_for_another_set() {
        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(MockProductRepo::new()),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(MockDetector::new()),
            logger: mock_logger(),
        };

        // Attribute 20 belongs to set 2.
        let result = use_case.execute(params(vec![choice(1, Some(20))])).await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::VariationSetMismatch { expected, .. } if expected == VariationSetId::new(1)
        ));
    }

    #[tokio::test]
    async fn should_propagate_repository_error_on_save() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_save()
            .returning(|_| Err(RepositoryError::DatabaseError));
        mock_repo.expect_add_variation_link().never();

        let mut detector = MockDetector::new();
        detector.expect_exists().returning(|_, _| Ok(false));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(vec![choice(1, Some(10))])).await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::DatabaseError)
        ));
    }

    #[tokio::test]
    async fn should_propagate_repository_error_on_link_write() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_save().times(1).returning(|_| Ok(()));
        mock_repo.expect_clear_variation_links().returning(|_| Ok(()));
        mock_repo
            .expect_add_variation_link()
            .times(1)
            .returning(|_, _| Err(RepositoryError::InvalidReference));

        let mut detector = MockDetector::new();
        detector.expect_exists().returning(|_, _| Ok(false));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            category_repository: Arc::new(existing_category()),
            variation_repository: Arc::new(known_attributes()),
            detector: Arc::new(detector),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(params(vec![choice(1, Some(10)), choice(2, Some(20))]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::InvalidReference)
        ));
    }
}
