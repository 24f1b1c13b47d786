//! Explicit request context.
//!
//! Every operation that depends on "who is asking" receives a `RequestContext`
//! instead of looking up a global current user.

use std::collections::BTreeSet;

/// Well-known capability names.
pub mod capabilities {
    /// Administrative capability required for ERP settings and mode switching.
    pub const MANAGE_OPTIONS: &str = "manage_options";
}

/// The authenticated principal of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user_id: i64,
    capabilities: BTreeSet<String>,
}

impl RequestContext {
    /// Creates a context for `user_id` holding `capabilities`.
    pub fn new<I, S>(user_id: i64, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the authenticated user's ID.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns true when the principal holds `capability`.
    #[must_use]
    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}
