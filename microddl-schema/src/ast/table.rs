//! Table and column definitions.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{ChangeTracking, DataType, DerivedSchema};

/// Domain assigned to tables declared before any `[Domain ...]` directive.
pub const DEFAULT_DOMAIN: &str = "Default";

fn default_domain() -> SmolStr {
    SmolStr::new_static(DEFAULT_DOMAIN)
}

/// A column declared inside a table stanza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Column name.
    #[serde(rename = "Column")]
    pub name: SmolStr,
    /// Declared kind.
    pub data_type: DataType,
    /// Size; its meaning depends on the kind (`"64"`, `"10,3"`, `"int"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SmolStr>,
    /// Target identity column for `-> Target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<SmolStr>,
    /// Target table for `=> Target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_join: Option<SmolStr>,
    /// Accumulated description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Column {
    /// Create a column with the kind's default size.
    pub fn new(name: impl Into<SmolStr>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.default_size().map(SmolStr::new_static),
            join: None,
            table_join: None,
            description: None,
        }
    }

    /// Get the column name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an explicit size.
    pub fn with_size(mut self, size: impl Into<SmolStr>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the column-level join target.
    pub fn with_join(mut self, target: impl Into<SmolStr>) -> Self {
        self.join = Some(target.into());
        self
    }

    /// Check if this is the table's identity column.
    pub fn is_identity(&self) -> bool {
        self.data_type == DataType::Identity
    }

    /// The change-tracking role implied by the column name, if any.
    pub fn change_tracking(&self) -> Option<ChangeTracking> {
        ChangeTracking::from_column_name(&self.name)
    }

    /// Append a description line; repeated lines are joined by a newline.
    pub fn append_description(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match &mut self.description {
            Some(existing) if !existing.is_empty() => {
                existing.push('\n');
                existing.push_str(text);
            }
            _ => self.description = Some(text.to_string()),
        }
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Table {
    /// Table name (unique key in the model).
    #[serde(rename = "TableName")]
    pub name: SmolStr,
    /// Grouping label, fixed when the table is first created.
    #[serde(default = "default_domain")]
    pub domain: SmolStr,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Description paragraphs joined by a blank line.
    #[serde(default)]
    pub description: String,
    /// Secondary schema, present once the model has been derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_schema: Option<DerivedSchema>,
}

impl Table {
    /// Create an empty table in a domain.
    pub fn new(name: impl Into<SmolStr>, domain: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            columns: vec![],
            description: String::new(),
            derived_schema: None,
        }
    }

    /// Get the table name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a mutable column by name.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// The identity column. When several are declared the last one wins.
    pub fn identity_column(&self) -> Option<&Column> {
        self.columns.iter().rev().find(|c| c.is_identity())
    }

    /// Name of the identity column, falling back to `ID<TableName>`.
    pub fn default_identifier(&self) -> SmolStr {
        match self.identity_column() {
            Some(column) => column.name.clone(),
            None => SmolStr::from(format!("ID{}", self.name)),
        }
    }

    /// Append a description paragraph.
    pub fn append_description(&mut self, text: &str) {
        if !self.description.is_empty() {
            self.description.push_str("\n\n");
        }
        self.description.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_defaults() {
        let column = Column::new("UserName", DataType::String);
        assert_eq!(column.size.as_deref(), Some("64"));

        let column = Column::new("IDUser", DataType::Identity);
        assert_eq!(column.size, None);
        assert!(column.is_identity());
    }

    #[test]
    fn test_column_serialization_omits_absent_fields() {
        let column = Column::new("IDUser", DataType::Identity);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Column": "IDUser", "DataType": "Identity" })
        );

        let column = Column::new("IDContact", DataType::ForeignKey).with_join("IDContact");
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["Join"], "IDContact");
    }

    #[test]
    fn test_column_description_accumulates() {
        let mut column = Column::new("Email", DataType::String);
        column.append_description("Primary address.");
        column.append_description("Must be unique.");
        assert_eq!(
            column.description.as_deref(),
            Some("Primary address.\nMust be unique.")
        );
    }

    #[test]
    fn test_default_identifier() {
        let mut table = Table::new("Book", DEFAULT_DOMAIN);
        assert_eq!(table.default_identifier(), "IDBook");

        table.columns.push(Column::new("BookKey", DataType::Identity));
        assert_eq!(table.default_identifier(), "BookKey");
    }

    #[test]
    fn test_table_description_paragraphs() {
        let mut table = Table::new("Book", DEFAULT_DOMAIN);
        table.append_description("First.");
        table.append_description("Second.");
        assert_eq!(table.description, "First.\n\nSecond.");
    }

    #[test]
    fn test_table_domain_defaults_on_load() {
        let table: Table =
            serde_json::from_str(r#"{ "TableName": "Book", "Columns": [] }"#).unwrap();
        assert_eq!(table.domain, DEFAULT_DOMAIN);
        assert!(table.derived_schema.is_none());
    }
}
