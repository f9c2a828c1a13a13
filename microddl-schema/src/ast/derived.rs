//! Secondary schema derived from each table after parsing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{AuthorizationPolicy, ChangeTracking, DataType, Table};

/// Type tag of a column in the derived schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    AutoIdentity,
    #[serde(rename = "AutoGUID")]
    AutoGuid,
    Integer,
    Decimal,
    String,
    DateTime,
    Boolean,
    CreateDate,
    #[serde(rename = "CreateIDUser")]
    CreateIdUser,
    UpdateDate,
    #[serde(rename = "UpdateIDUser")]
    UpdateIdUser,
    DeleteDate,
    #[serde(rename = "DeleteIDUser")]
    DeleteIdUser,
    Deleted,
}

impl SchemaType {
    /// Type tag for a declared column kind.
    pub fn for_data_type(data_type: DataType) -> Self {
        match data_type {
            DataType::Identity => Self::AutoIdentity,
            DataType::Guid => Self::AutoGuid,
            DataType::ForeignKey | DataType::Numeric => Self::Integer,
            DataType::Decimal => Self::Decimal,
            DataType::String | DataType::Text => Self::String,
            DataType::DateTime => Self::DateTime,
            DataType::Boolean => Self::Boolean,
        }
    }

    /// Type tag for a change-tracking column; overrides the declared kind.
    pub fn for_change_tracking(role: ChangeTracking) -> Self {
        match role {
            ChangeTracking::CreateDate => Self::CreateDate,
            ChangeTracking::CreatingUser => Self::CreateIdUser,
            ChangeTracking::UpdateDate => Self::UpdateDate,
            ChangeTracking::UpdatingUser => Self::UpdateIdUser,
            ChangeTracking::DeleteDate => Self::DeleteDate,
            ChangeTracking::DeletingUser => Self::DeleteIdUser,
            ChangeTracking::Deleted => Self::Deleted,
        }
    }
}

/// One column of the derived schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaEntry {
    pub column: SmolStr,
    #[serde(rename = "Type")]
    pub kind: SchemaType,
    /// Declared size, or `"Default"`.
    pub size: SmolStr,
}

/// A JSON-Schema property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaProperty {
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub size: SmolStr,
}

/// JSON-Schema fragment describing a table's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFragment {
    pub title: SmolStr,
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub properties: IndexMap<SmolStr, JsonSchemaProperty>,
    pub required: Vec<SmolStr>,
    /// Copy of the owning table, without this fragment inside it.
    #[serde(rename = "Table", default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Box<Table>>,
}

/// Secondary schema of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DerivedSchema {
    /// Owning table name.
    pub scope: SmolStr,
    pub default_identifier: SmolStr,
    pub domain: SmolStr,
    pub schema: Vec<SchemaEntry>,
    /// Zero value per column, keyed by column name.
    pub default_object: IndexMap<SmolStr, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchemaFragment>,
    #[serde(default)]
    pub authorization: AuthorizationPolicy,
}

impl DerivedSchema {
    /// Get the schema entry of a column.
    pub fn entry(&self, column: &str) -> Option<&SchemaEntry> {
        self.schema.iter().find(|e| e.column == column)
    }
}
