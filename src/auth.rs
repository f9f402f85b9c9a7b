//! Authorization - roles, caller context, and the role lookup table.
//!
//! Every action performs its role check through [`AuthContext::require`], so
//! the "who can do what" policy lives in exactly one place instead of being
//! re-implemented per operation. Role assignments come from configuration
//! (see [`crate::config::users`]); unknown users fall back to [`Role::Viewer`].

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller role, ordered from least to most privileged.
///
/// A role satisfies a requirement if it is equal to or above it:
/// `Viewer < Worker < Manager < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access to farms, stock, invoices, and reports
    Viewer,
    /// Day-to-day ledger mutations: invoice items, manufacturing, daily reports
    Worker,
    /// Registry management: farms, warehouses, materials, invoice deletion
    Manager,
    /// Full access, including farm deletion
    Admin,
}

impl Role {
    /// Stable lowercase name, used in error messages and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Worker => "worker",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Parses a role name as it appears in configuration.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "worker" => Ok(Role::Worker),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(Error::Config {
                message: format!("Unknown role: {other}"),
            }),
        }
    }
}

/// Resolved identity of the caller of an action.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Opaque user identifier from the authentication layer
    pub user_id: String,
    /// Role granted to this user
    pub role: Role,
}

impl AuthContext {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Fails with [`Error::Unauthorized`] unless the caller's role is at
    /// least `required`.
    pub fn require(&self, required: Role) -> Result<()> {
        if self.role >= required {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                required: required.as_str(),
                actual: self.role.as_str(),
            })
        }
    }
}

/// Maps user ids to roles. Built once from configuration and shared with
/// whatever request layer invokes the actions.
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    roles: HashMap<String, Role>,
}

impl Authorizer {
    #[must_use]
    pub fn new(roles: HashMap<String, Role>) -> Self {
        Self { roles }
    }

    /// Number of users with an explicit role assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Resolves the [`AuthContext`] for a user. Users without an explicit
    /// assignment get [`Role::Viewer`].
    #[must_use]
    pub fn context_for(&self, user_id: &str) -> AuthContext {
        let role = self.roles.get(user_id).copied().unwrap_or(Role::Viewer);
        AuthContext::new(user_id, role)
    }
}
