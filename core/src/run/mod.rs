pub mod pipeline;
pub mod uid;
