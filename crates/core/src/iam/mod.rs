mod types;

pub use types::{Grant, Role};
