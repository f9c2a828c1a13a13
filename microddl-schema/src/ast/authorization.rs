//! Role-based endpoint authorization policies.
//!
//! Each table carries a policy mapping role name to operation name to an
//! [`Authorizer`] token. Policies start as a clone of the built-in role
//! presets and are then overridden line by line from `[Authorization ...]`
//! stanzas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Key of the pattern entry used for endpoints without an explicit role.
///
/// It lives next to the real roles but is never touched by wildcard updates.
pub const DEFAULT_ROLE_KEY: &str = "__DefaultAPISecurity";

/// Wildcard role selector in authorization lines.
pub const ALL_ROLES: &str = "*";

/// Access policy for one role and operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Authorizer {
    /// Always permitted.
    Allow,
    /// Never permitted.
    Deny,
    /// Permitted for records the caller owns.
    Mine,
    /// Permitted for records belonging to the caller's customer.
    MyCustomer,
    /// An authorizer registered by the consuming application.
    Custom(SmolStr),
}

impl Authorizer {
    /// Get the token as it appears in MicroDDL and JSON.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
            Self::Mine => "Mine",
            Self::MyCustomer => "MyCustomer",
            Self::Custom(token) => token,
        }
    }
}

impl From<&str> for Authorizer {
    fn from(token: &str) -> Self {
        match token {
            "Allow" => Self::Allow,
            "Deny" => Self::Deny,
            "Mine" => Self::Mine,
            "MyCustomer" => Self::MyCustomer,
            other => Self::Custom(SmolStr::new(other)),
        }
    }
}

impl From<String> for Authorizer {
    fn from(token: String) -> Self {
        Self::from(token.as_str())
    }
}

impl From<Authorizer> for String {
    fn from(authorizer: Authorizer) -> Self {
        authorizer.as_str().to_string()
    }
}

impl std::fmt::Display for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation name to authorizer, for a single role.
pub type OperationAuthorizers = IndexMap<SmolStr, Authorizer>;

/// Outcome of applying one authorization line to a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationChange {
    /// A single role was updated; holds the token it replaced.
    Role { previous: Option<Authorizer> },
    /// The wildcard updated this many roles.
    Broadcast { roles: usize },
    /// The named role does not exist on this table; nothing changed.
    UnknownRole,
}

/// The authorization policy of one table: role to operation to authorizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationPolicy {
    roles: IndexMap<SmolStr, OperationAuthorizers>,
}

impl AuthorizationPolicy {
    /// Create an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a role with its operation tokens.
    pub fn insert_role(&mut self, role: impl Into<SmolStr>, operations: OperationAuthorizers) {
        self.roles.insert(role.into(), operations);
    }

    /// Check if a role is present.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Get the operations of a role.
    pub fn role(&self, role: &str) -> Option<&OperationAuthorizers> {
        self.roles.get(role)
    }

    /// Get the token for a role and operation.
    pub fn get(&self, role: &str, operation: &str) -> Option<&Authorizer> {
        self.roles.get(role).and_then(|ops| ops.get(operation))
    }

    /// Iterate over role names, including the default pattern key.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(SmolStr::as_str)
    }

    /// Iterate over roles and their operations.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &OperationAuthorizers)> {
        self.roles.iter()
    }

    /// Number of role entries, including the default pattern key.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the policy has no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Apply one authorization line.
    ///
    /// `role` is either a role name or [`ALL_ROLES`]. The wildcard updates every
    /// present role except [`DEFAULT_ROLE_KEY`]; unknown roles are never created.
    pub fn apply(
        &mut self,
        operation: &str,
        role: &str,
        authorizer: Authorizer,
    ) -> AuthorizationChange {
        if role == ALL_ROLES {
            let mut roles = 0;
            for (name, operations) in self.roles.iter_mut() {
                if name == DEFAULT_ROLE_KEY {
                    continue;
                }
                operations.insert(SmolStr::new(operation), authorizer.clone());
                roles += 1;
            }
            return AuthorizationChange::Broadcast { roles };
        }

        match self.roles.get_mut(role) {
            Some(operations) => {
                let previous = operations.insert(SmolStr::new(operation), authorizer);
                AuthorizationChange::Role { previous }
            }
            None => AuthorizationChange::UnknownRole,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AuthorizationPolicy {
        let mut policy = AuthorizationPolicy::new();
        for role in [DEFAULT_ROLE_KEY, "User", "Administrator"] {
            let mut ops = OperationAuthorizers::new();
            ops.insert("Read".into(), Authorizer::Deny);
            ops.insert("Update".into(), Authorizer::Deny);
            policy.insert_role(role, ops);
        }
        policy
    }

    #[test]
    fn test_authorizer_tokens() {
        assert_eq!(Authorizer::from("Mine"), Authorizer::Mine);
        assert_eq!(
            Authorizer::from("SameTenant"),
            Authorizer::Custom("SameTenant".into())
        );
        assert_eq!(Authorizer::Custom("SameTenant".into()).as_str(), "SameTenant");
    }

    #[test]
    fn test_authorizer_serializes_as_plain_string() {
        let json = serde_json::to_string(&Authorizer::MyCustomer).unwrap();
        assert_eq!(json, "\"MyCustomer\"");

        let custom: Authorizer = serde_json::from_str("\"Auditor\"").unwrap();
        assert_eq!(custom, Authorizer::Custom("Auditor".into()));
    }

    #[test]
    fn test_apply_single_role() {
        let mut policy = policy();
        let change = policy.apply("Read", "User", Authorizer::Allow);
        assert_eq!(
            change,
            AuthorizationChange::Role {
                previous: Some(Authorizer::Deny)
            }
        );
        assert_eq!(policy.get("User", "Read"), Some(&Authorizer::Allow));
        assert_eq!(policy.get("Administrator", "Read"), Some(&Authorizer::Deny));
    }

    #[test]
    fn test_apply_wildcard_skips_default_key() {
        let mut policy = policy();
        let change = policy.apply("Read", ALL_ROLES, Authorizer::Mine);
        assert_eq!(change, AuthorizationChange::Broadcast { roles: 2 });
        assert_eq!(policy.get("User", "Read"), Some(&Authorizer::Mine));
        assert_eq!(policy.get("Administrator", "Read"), Some(&Authorizer::Mine));
        assert_eq!(policy.get(DEFAULT_ROLE_KEY, "Read"), Some(&Authorizer::Deny));
        assert_eq!(policy.get("User", "Update"), Some(&Authorizer::Deny));
    }

    #[test]
    fn test_apply_unknown_role_is_ignored() {
        let mut policy = policy();
        let before = policy.clone();
        let change = policy.apply("Read", "Auditor", Authorizer::Allow);
        assert_eq!(change, AuthorizationChange::UnknownRole);
        assert_eq!(policy, before);
        assert!(!policy.has_role("Auditor"));
    }
}
