pub mod creature;
pub mod layer;
pub mod tree;
