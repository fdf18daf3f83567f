pub mod diagnostics;
pub mod document;
pub mod errors;
pub mod expression;
pub mod factory;
pub mod graph;
pub mod legacy;
pub mod resolution;
pub mod serialization;
pub mod types;
