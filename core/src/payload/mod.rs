pub mod model;
pub mod summary;
