pub mod containment;
pub mod writer;
