//! External user-identity oracle contract.
//!
//! The lifecycle engine only needs a yes/no answer for an actor id; the
//! concrete service client lives with the deployment, not here. The call is
//! a blocking round trip with no caching.

use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityOracle: Send + Sync {
    /// Whether `user_id` names a known, valid user.
    async fn is_valid_user(&self, user_id: &str) -> bool;
}
