pub mod adapters;
pub mod audit;
pub mod config;
pub mod content;
pub mod materialize;
pub mod payload;
pub mod response;
pub mod run;
pub mod snapshot;

pub mod error;
