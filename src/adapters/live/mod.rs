//! Live adapters for real external interactions.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod filesystem;
pub mod llm;
