//! Column kinds and change-tracking roles.

use serde::{Deserialize, Serialize};

/// The fixed set of column kinds a MicroDDL column can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Auto-incrementing numeric identity (`@`).
    #[serde(alias = "ID")]
    Identity,
    /// GUID column (`%`).
    #[serde(rename = "GUID")]
    Guid,
    /// Reference to another table's identity (`~`).
    ForeignKey,
    /// Sized string (`$`).
    String,
    /// Integer (`#`).
    Numeric,
    /// Fixed precision decimal (`.`).
    Decimal,
    /// Unbounded text (`*`).
    Text,
    /// Date and time (`&`).
    DateTime,
    /// Boolean flag (`^`).
    Boolean,
}

impl DataType {
    /// All column kinds, in symbol-table order.
    pub const ALL: [DataType; 9] = [
        Self::Identity,
        Self::Guid,
        Self::ForeignKey,
        Self::String,
        Self::Numeric,
        Self::Decimal,
        Self::Text,
        Self::DateTime,
        Self::Boolean,
    ];

    /// Look up the column kind for a leading line symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '@' => Some(Self::Identity),
            '%' => Some(Self::Guid),
            '~' => Some(Self::ForeignKey),
            '$' => Some(Self::String),
            '#' => Some(Self::Numeric),
            '.' => Some(Self::Decimal),
            '*' => Some(Self::Text),
            '&' => Some(Self::DateTime),
            '^' => Some(Self::Boolean),
            _ => None,
        }
    }

    /// The leading symbol that declares this kind.
    pub fn symbol(&self) -> char {
        match self {
            Self::Identity => '@',
            Self::Guid => '%',
            Self::ForeignKey => '~',
            Self::String => '$',
            Self::Numeric => '#',
            Self::Decimal => '.',
            Self::Text => '*',
            Self::DateTime => '&',
            Self::Boolean => '^',
        }
    }

    /// The size recorded when a declaration gives no explicit size.
    ///
    /// Kinds without a size return `None` and never carry one.
    pub fn default_size(&self) -> Option<&'static str> {
        match self {
            Self::Guid => Some("36"),
            Self::String => Some("64"),
            Self::Numeric => Some("int"),
            Self::Decimal => Some("10,3"),
            _ => None,
        }
    }

    /// Check if a declaration of this kind may override its size.
    pub fn is_sized(&self) -> bool {
        self.default_size().is_some()
    }

    /// The serialized name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Guid => "GUID",
            Self::ForeignKey => "ForeignKey",
            Self::String => "String",
            Self::Numeric => "Numeric",
            Self::Decimal => "Decimal",
            Self::Text => "Text",
            Self::DateTime => "DateTime",
            Self::Boolean => "Boolean",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implicit change-tracking role carried by a "magic" column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeTracking {
    CreateDate,
    CreatingUser,
    UpdateDate,
    UpdatingUser,
    DeleteDate,
    DeletingUser,
    Deleted,
}

impl ChangeTracking {
    /// Detect the change-tracking role of a column name.
    pub fn from_column_name(name: &str) -> Option<Self> {
        match name {
            "CreateDate" => Some(Self::CreateDate),
            "CreatingIDUser" => Some(Self::CreatingUser),
            "UpdateDate" => Some(Self::UpdateDate),
            "UpdatingIDUser" => Some(Self::UpdatingUser),
            "DeleteDate" => Some(Self::DeleteDate),
            "DeletingIDUser" => Some(Self::DeletingUser),
            "Deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// The column name that carries this role.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::CreateDate => "CreateDate",
            Self::CreatingUser => "CreatingIDUser",
            Self::UpdateDate => "UpdateDate",
            Self::UpdatingUser => "UpdatingIDUser",
            Self::DeleteDate => "DeleteDate",
            Self::DeletingUser => "DeletingIDUser",
            Self::Deleted => "Deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_is_bijective() {
        for kind in DataType::ALL {
            assert_eq!(DataType::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(DataType::from_symbol('!'), None);
        assert_eq!(DataType::from_symbol('"'), None);
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(DataType::String.default_size(), Some("64"));
        assert_eq!(DataType::Guid.default_size(), Some("36"));
        assert_eq!(DataType::Decimal.default_size(), Some("10,3"));
        assert_eq!(DataType::Numeric.default_size(), Some("int"));
        assert_eq!(DataType::Identity.default_size(), None);
        assert!(!DataType::Boolean.is_sized());
    }

    #[test]
    fn test_data_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&DataType::Identity).unwrap(),
            "\"Identity\""
        );
        assert_eq!(serde_json::to_string(&DataType::Guid).unwrap(), "\"GUID\"");

        let legacy: DataType = serde_json::from_str("\"ID\"").unwrap();
        assert_eq!(legacy, DataType::Identity);
    }

    #[test]
    fn test_change_tracking_names() {
        assert_eq!(
            ChangeTracking::from_column_name("CreatingIDUser"),
            Some(ChangeTracking::CreatingUser)
        );
        assert_eq!(ChangeTracking::from_column_name("CreatedAt"), None);
        assert_eq!(ChangeTracking::Deleted.column_name(), "Deleted");
    }
}
