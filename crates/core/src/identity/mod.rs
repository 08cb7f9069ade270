mod identity_pool;
mod user_pool;

pub use identity_pool::{IdentityPool, IdentityPoolBuilder, UserPoolProvider};
pub use user_pool::{
    AccountRecovery, StandardAttribute, UserPool, UserPoolBuilder, UserPoolClient, UserPoolGroup,
    VerificationStyle,
};
