#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
