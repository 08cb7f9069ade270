mod types;

pub use types::{Bucket, BucketBuilder, CorsMethod, CorsRule};
