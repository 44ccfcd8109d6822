pub mod icon_imports;
pub mod normalize;
