pub mod aggregates;
pub mod app;
pub mod factory;

#[allow(unused_imports)]
pub use aggregates::install_aggregate_functions;
#[allow(unused_imports)]
pub use app::{test_config, TestApp};
#[allow(unused_imports)]
pub use factory::{Factory, TestAuth};
