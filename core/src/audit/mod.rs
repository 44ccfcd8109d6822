pub mod report;
pub mod responses;
