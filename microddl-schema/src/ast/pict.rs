//! PICT UI-scaffolding configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// `Type` attribute given to `#Heading` lines in PICT stanzas.
pub const SECTION_HEADING: &str = "SectionHeading";

/// The five UI views configured per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PictOperation {
    Create,
    Record,
    List,
    Update,
    Delete,
}

impl PictOperation {
    /// All operations, in template order.
    pub const ALL: [PictOperation; 5] = [
        Self::Create,
        Self::Record,
        Self::Update,
        Self::List,
        Self::Delete,
    ];

    /// Parse the operation part of a `PICT-<Op>` directive keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Create" => Some(Self::Create),
            "Record" => Some(Self::Record),
            "List" => Some(Self::List),
            "Update" => Some(Self::Update),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Get the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Record => "Record",
            Self::List => "List",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for PictOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column (or section heading) shown by a PICT view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictColumn {
    /// Column name, or heading text for section headings.
    #[serde(rename = "Column")]
    pub column: SmolStr,
    /// Entry type, e.g. [`SECTION_HEADING`].
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SmolStr>,
    /// Free-form `key:value` attributes.
    #[serde(flatten)]
    pub attributes: IndexMap<SmolStr, String>,
}

impl PictColumn {
    /// Create a plain column entry.
    pub fn new(column: impl Into<SmolStr>) -> Self {
        Self {
            column: column.into(),
            kind: None,
            attributes: IndexMap::new(),
        }
    }

    /// Create a section heading entry.
    pub fn section_heading(text: impl Into<SmolStr>) -> Self {
        Self {
            column: text.into(),
            kind: Some(SmolStr::new_static(SECTION_HEADING)),
            attributes: IndexMap::new(),
        }
    }

    /// Check if this entry is a section heading.
    pub fn is_section_heading(&self) -> bool {
        self.kind.as_deref() == Some(SECTION_HEADING)
    }
}

/// Reason a `:Name=value` property could not be applied to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRejection {
    /// `Enabled` only accepts `true` or `false`.
    EnabledNotBoolean,
    /// `Columns` is built from column lines, not assigned.
    ColumnsNotAssignable,
}

impl std::fmt::Display for PropertyRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnabledNotBoolean => f.write_str("Enabled must be true or false"),
            Self::ColumnsNotAssignable => f.write_str("Columns cannot be assigned"),
        }
    }
}

/// Configuration of one PICT view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictView {
    #[serde(rename = "Enabled", default = "default_enabled")]
    pub enabled: bool,
    #[serde(rename = "Columns", default)]
    pub columns: Vec<PictColumn>,
    /// Display title template; placeholders are not evaluated here.
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Any other view property (`RowMenu`, `ConfirmationMessage`, ...).
    #[serde(flatten)]
    pub properties: IndexMap<SmolStr, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl PictView {
    /// Create an enabled view with a title template.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            enabled: true,
            columns: vec![],
            title: title.into(),
            properties: IndexMap::new(),
        }
    }

    /// Add an extra property.
    pub fn with_property(mut self, name: &str, value: serde_json::Value) -> Self {
        self.properties.insert(SmolStr::new(name), value);
        self
    }

    /// Set a property by name, routing well-known names to their fields.
    pub fn set_property(
        &mut self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), PropertyRejection> {
        match name {
            "Enabled" => match value {
                serde_json::Value::Bool(enabled) => {
                    self.enabled = enabled;
                    Ok(())
                }
                _ => Err(PropertyRejection::EnabledNotBoolean),
            },
            "Title" => {
                // Non-string values keep their JSON text, so `true` becomes "true".
                self.title = match value {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                Ok(())
            }
            "Columns" => Err(PropertyRejection::ColumnsNotAssignable),
            _ => {
                self.properties.insert(SmolStr::new(name), value);
                Ok(())
            }
        }
    }

    /// Get an extra property.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }
}

/// The five PICT views of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PictEntity {
    pub create: PictView,
    pub record: PictView,
    pub update: PictView,
    pub list: PictView,
    pub delete: PictView,
}

impl PictEntity {
    /// Get the view for an operation.
    pub fn view(&self, operation: PictOperation) -> &PictView {
        match operation {
            PictOperation::Create => &self.create,
            PictOperation::Record => &self.record,
            PictOperation::List => &self.list,
            PictOperation::Update => &self.update,
            PictOperation::Delete => &self.delete,
        }
    }

    /// Get the mutable view for an operation.
    pub fn view_mut(&mut self, operation: PictOperation) -> &mut PictView {
        match operation {
            PictOperation::Create => &mut self.create,
            PictOperation::Record => &mut self.record,
            PictOperation::List => &mut self.list,
            PictOperation::Update => &mut self.update,
            PictOperation::Delete => &mut self.delete,
        }
    }
}
