//! Declaration model for the cirrus infrastructure toolkit.
//!
//! Everything in this crate describes *desired* infrastructure state:
//! resources are built once at definition time, handed around as cheap
//! cloneable handles, and rendered into deployment templates by the
//! [`synth`] module. Nothing here talks to a cloud provider — resolving
//! the declarations is the deployment orchestrator's job.

pub mod database;
pub mod graphql;
pub mod iam;
pub mod identity;
pub mod storage;
pub mod synth;
