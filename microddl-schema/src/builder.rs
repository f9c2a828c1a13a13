//! Model builder.
//!
//! Owns the model while it grows. Table, authorization and PICT entries are
//! created lazily on first reference, seeded from clones of the templates in
//! [`crate::defaults`], and never removed.

use tracing::debug;

use crate::ast::{
    Authorizer, AuthorizationChange, Column, Model, PictOperation, PictView, Table,
};
use crate::defaults::{DEFAULT_AUTHORIZATION, DEFAULT_ENDPOINTS, DEFAULT_PICT};

/// What declaring a column did to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChange {
    /// The column was appended.
    Added,
    /// A column with the same name existed and was updated in place.
    Updated,
}

/// Builds a [`Model`] one mutation at a time.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Create a builder with an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// The model built so far.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Finish building.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Create the table scope on first reference.
    ///
    /// Creates the table in `domain`, appends it to the sequence, seeds its
    /// authorization policy and resets the global endpoints. Returns `false`
    /// when the table already existed, in which case nothing changes.
    pub fn initialize_scope(&mut self, name: &str, domain: &str) -> bool {
        if self.model.tables.contains_key(name) {
            return false;
        }

        debug!(table = name, domain, "initializing table scope");
        self.model
            .tables
            .insert(name.into(), Table::new(name, domain));
        self.model.tables_sequence.push(name.into());
        self.model.endpoints = DEFAULT_ENDPOINTS.clone();
        self.model
            .authorization
            .insert(name.into(), DEFAULT_AUTHORIZATION.clone());
        true
    }

    /// Create the PICT scope of a table on first reference.
    pub fn initialize_pict_scope(&mut self, name: &str) -> bool {
        if self.model.pict.contains_key(name) {
            return false;
        }

        debug!(table = name, "initializing PICT scope");
        self.model.pict.insert(name.into(), DEFAULT_PICT.clone());
        true
    }

    /// Declare a column, updating an existing column of the same name in place.
    ///
    /// An existing column keeps its description and any join the new
    /// declaration does not repeat. Returns `None` if the table is unknown.
    pub fn declare_column(&mut self, table: &str, column: Column) -> Option<ColumnChange> {
        let table = self.model.tables.get_mut(table)?;

        match table.column_mut(&column.name) {
            Some(existing) => {
                existing.data_type = column.data_type;
                existing.size = column.size;
                if column.join.is_some() {
                    existing.join = column.join;
                }
                if column.table_join.is_some() {
                    existing.table_join = column.table_join;
                }
                Some(ColumnChange::Updated)
            }
            None => {
                table.columns.push(column);
                Some(ColumnChange::Added)
            }
        }
    }

    /// Append description text to an existing column.
    ///
    /// Returns `false` if the table or column does not exist.
    pub fn describe_column(&mut self, table: &str, column: &str, text: &str) -> bool {
        match self
            .model
            .tables
            .get_mut(table)
            .and_then(|t| t.column_mut(column))
        {
            Some(column) => {
                column.append_description(text);
                true
            }
            None => false,
        }
    }

    /// Append a description paragraph to a table.
    pub fn describe_table(&mut self, table: &str, text: &str) -> bool {
        match self.model.tables.get_mut(table) {
            Some(table) => {
                table.append_description(text);
                true
            }
            None => false,
        }
    }

    /// Override an authorizer on a table's policy.
    ///
    /// Returns `None` if the table has no policy.
    pub fn authorize(
        &mut self,
        table: &str,
        operation: &str,
        role: &str,
        authorizer: Authorizer,
    ) -> Option<AuthorizationChange> {
        let policy = self.model.authorization.get_mut(table)?;
        Some(policy.apply(operation, role, authorizer))
    }

    /// Get a PICT view of a table for modification.
    pub fn pict_view_mut(&mut self, table: &str, operation: PictOperation) -> Option<&mut PictView> {
        self.model
            .pict
            .get_mut(table)
            .map(|entity| entity.view_mut(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataType, DEFAULT_ROLE_KEY};
    use crate::defaults::ROLES;

    #[test]
    fn test_initialize_scope_is_idempotent() {
        let mut builder = ModelBuilder::new();
        assert!(builder.initialize_scope("User", "Default"));
        assert!(!builder.initialize_scope("User", "Metadata"));

        let model = builder.model();
        assert_eq!(model.tables_sequence, vec!["User"]);
        assert_eq!(model.tables["User"].domain, "Default");
        assert_eq!(model.authorization["User"].len(), ROLES.len() + 1);
        assert_eq!(model.endpoints.len(), 13);
    }

    #[test]
    fn test_authorization_copies_are_independent() {
        let mut builder = ModelBuilder::new();
        builder.initialize_scope("User", "Default");
        builder.initialize_scope("Contact", "Default");

        builder.authorize("User", "Read", "*", Authorizer::Deny);

        let model = builder.model();
        assert_eq!(
            model.authorization["User"].get("Administrator", "Read"),
            Some(&Authorizer::Deny)
        );
        assert_eq!(
            model.authorization["Contact"].get("Administrator", "Read"),
            Some(&Authorizer::Allow)
        );
        assert_eq!(
            DEFAULT_AUTHORIZATION.get("Administrator", "Read"),
            Some(&Authorizer::Allow)
        );
        assert_eq!(
            model.authorization["User"].get(DEFAULT_ROLE_KEY, "Read"),
            Some(&Authorizer::Deny)
        );
    }

    #[test]
    fn test_declare_column_appends_then_updates() {
        let mut builder = ModelBuilder::new();
        builder.initialize_scope("User", "Default");

        let change = builder.declare_column("User", Column::new("Name", DataType::String));
        assert_eq!(change, Some(ColumnChange::Added));
        builder.describe_column("User", "Name", "Display name");

        let change = builder.declare_column(
            "User",
            Column::new("Name", DataType::String).with_size("128"),
        );
        assert_eq!(change, Some(ColumnChange::Updated));

        let table = &builder.model().tables["User"];
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].size.as_deref(), Some("128"));
        assert_eq!(table.columns[0].description.as_deref(), Some("Display name"));
    }

    #[test]
    fn test_unknown_targets() {
        let mut builder = ModelBuilder::new();
        assert_eq!(
            builder.declare_column("Nope", Column::new("A", DataType::Text)),
            None
        );
        assert!(!builder.describe_column("Nope", "A", "x"));
        assert!(!builder.describe_table("Nope", "x"));
        assert!(builder.authorize("Nope", "Read", "*", Authorizer::Allow).is_none());
        assert!(builder.pict_view_mut("Nope", PictOperation::List).is_none());
    }

    #[test]
    fn test_pict_scope_is_independent_clone() {
        let mut builder = ModelBuilder::new();
        assert!(builder.initialize_pict_scope("User"));
        assert!(!builder.initialize_pict_scope("User"));
        builder.initialize_pict_scope("Address");

        builder
            .pict_view_mut("User", PictOperation::List)
            .unwrap()
            .enabled = false;

        let model = builder.model();
        assert!(!model.pict["User"].list.enabled);
        assert!(model.pict["Address"].list.enabled);
        assert!(DEFAULT_PICT.list.enabled);
        assert!(model.tables.is_empty());
    }
}
