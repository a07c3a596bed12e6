pub mod application {
    pub mod category {
        pub mod get_all;
    }
    pub mod product {
        pub mod create;
        pub mod delete;
        pub mod duplicate_detector;
        pub mod get_by_id;
        pub mod search;
        pub mod update;
        mod variations;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod category {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_all;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod services;
        pub mod validation;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod get_by_id;
            pub mod search;
            pub mod update;
        }
    }
    pub mod shared {
        pub mod value_objects;
    }
    pub mod variation {
        pub mod model;
        pub mod repository;
    }
}
