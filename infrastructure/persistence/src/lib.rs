pub mod config;
pub mod db;
pub mod setup;
pub mod category {
    pub mod entity;
    pub mod repository;
}
pub mod product {
    pub mod entity;
    pub mod repository;
}
pub mod variation {
    pub mod entity;
    pub mod repository;
}
