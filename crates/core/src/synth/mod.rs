mod error;
mod traits;
mod types;

pub use error::{Result, SynthError};
pub use traits::Synthesize;
pub use types::{attr, Output, Resource, Stack, Template};
