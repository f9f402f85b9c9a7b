//! User role configuration from environment variables.
//!
//! Role assignments are read from `COOPSTOCK_USER_ROLES`, a comma-separated
//! list of `user_id:role` pairs, e.g.
//! `COOPSTOCK_USER_ROLES=alice:admin,bob:manager,carol:worker`.
//! Users without an assignment default to the viewer role at authorization
//! time.

use crate::auth::{Authorizer, Role};
use crate::errors::Result;
use std::collections::HashMap;

const USER_ROLES_VAR: &str = "COOPSTOCK_USER_ROLES";

/// Parses a `user_id:role` assignment list.
///
/// # Errors
/// Returns a configuration error for malformed pairs or unknown role names.
pub fn parse_user_roles(raw: &str) -> Result<HashMap<String, Role>> {
    let mut roles = HashMap::new();

    for pair in raw.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let (user_id, role) = pair.split_once(':').ok_or_else(|| crate::errors::Error::Config {
            message: format!("Malformed role assignment: {pair} (expected user_id:role)"),
        })?;

        roles.insert(user_id.trim().to_string(), Role::parse(role)?);
    }

    Ok(roles)
}

/// Builds the [`Authorizer`] from the environment. An unset variable means
/// every caller is a viewer.
pub fn load_authorizer() -> Result<Authorizer> {
    let raw = std::env::var(USER_ROLES_VAR).unwrap_or_default();
    Ok(Authorizer::new(parse_user_roles(&raw)?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_user_roles() {
        let roles = parse_user_roles("alice:admin, bob:manager ,carol:worker").unwrap();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles["alice"], Role::Admin);
        assert_eq!(roles["bob"], Role::Manager);
        assert_eq!(roles["carol"], Role::Worker);
    }

    #[test]
    fn test_parse_user_roles_empty() {
        assert!(parse_user_roles("").unwrap().is_empty());
        assert!(parse_user_roles(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_user_roles_rejects_malformed() {
        assert!(parse_user_roles("alice").is_err());
        assert!(parse_user_roles("alice:king").is_err());
    }
}
