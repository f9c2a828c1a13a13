//! Built-in templates seeded into every new table.
//!
//! The templates are immutable statics; the model builder always takes a
//! structural [`Clone`] so that overriding one table never leaks into another
//! table or into the template.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::json;
use smol_str::SmolStr;

use crate::ast::{
    Authorizer, AuthorizationPolicy, DEFAULT_ROLE_KEY, Endpoints, OperationAuthorizers,
    PictEntity, PictView,
};

/// Endpoint operations, in the order they are emitted.
pub const ENDPOINT_OPERATIONS: [&str; 13] = [
    "Create",
    "Read",
    "Reads",
    "ReadsBy",
    "ReadMax",
    "ReadSelectList",
    "Update",
    "Delete",
    "Count",
    "CountBy",
    "Schema",
    "Validate",
    "New",
];

/// Built-in roles, lowest privilege first.
pub const ROLES: [&str; 7] = [
    "Unauthenticated",
    "Readonly",
    "User",
    "Manager",
    "Director",
    "Executive",
    "Administrator",
];

/// Default authorization policy: the pattern key plus one preset per role.
pub static DEFAULT_AUTHORIZATION: LazyLock<AuthorizationPolicy> =
    LazyLock::new(build_authorization_template);

/// Default endpoint exposure: everything is exposed.
pub static DEFAULT_ENDPOINTS: LazyLock<Endpoints> = LazyLock::new(|| {
    ENDPOINT_OPERATIONS
        .iter()
        .map(|&op| (SmolStr::new_static(op), true))
        .collect()
});

/// Default PICT configuration for a table.
pub static DEFAULT_PICT: LazyLock<PictEntity> = LazyLock::new(|| PictEntity {
    create: PictView::new("Create a <%= EntityName %>"),
    record: PictView::new("Read a <%= EntityName %>"),
    update: PictView::new("Update a <%= EntityName %>"),
    list: PictView::new("<%= EntityName %>s").with_property("RowMenu", json!(true)),
    delete: PictView::new("Delete a <%= EntityName %>")
        .with_property("Validation", json!(true))
        .with_property("DisplayRecord", json!(true))
        .with_property(
            "ConfirmationMessage",
            json!("Are you sure you want to delete this record with ID XXXXX?"),
        ),
});

/// Presets shared between roles.
#[derive(Debug, Clone, Copy)]
enum Preset {
    DenyAll,
    AllowAll,
    Readonly,
    Customer,
    CustomerMine,
}

impl Preset {
    fn for_role(role: &str) -> Self {
        match role {
            "Readonly" => Self::Readonly,
            "User" | "Manager" => Self::CustomerMine,
            "Director" | "Executive" => Self::Customer,
            "Administrator" => Self::AllowAll,
            _ => Self::DenyAll,
        }
    }

    fn authorizer(self, operation: &str) -> Authorizer {
        match self {
            Self::DenyAll => Authorizer::Deny,
            Self::AllowAll => Authorizer::Allow,
            Self::Readonly => match operation {
                "Create" | "Update" | "Delete" | "New" => Authorizer::Deny,
                _ => Authorizer::Allow,
            },
            Self::Customer => match operation {
                "Create" => Authorizer::Allow,
                _ => Authorizer::MyCustomer,
            },
            Self::CustomerMine => match operation {
                "Create" => Authorizer::Allow,
                "Update" | "Delete" => Authorizer::Mine,
                _ => Authorizer::MyCustomer,
            },
        }
    }

    fn operations(self) -> OperationAuthorizers {
        ENDPOINT_OPERATIONS
            .iter()
            .map(|&op| (SmolStr::new_static(op), self.authorizer(op)))
            .collect::<IndexMap<_, _>>()
    }
}

fn build_authorization_template() -> AuthorizationPolicy {
    let mut policy = AuthorizationPolicy::new();
    policy.insert_role(DEFAULT_ROLE_KEY, Preset::DenyAll.operations());
    for role in ROLES {
        policy.insert_role(role, Preset::for_role(role).operations());
    }
    policy
}
