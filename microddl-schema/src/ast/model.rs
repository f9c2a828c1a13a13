//! The compiled MicroDDL model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{AuthorizationPolicy, PictEntity, Table};

/// Endpoint operation name to exposure flag.
pub type Endpoints = IndexMap<SmolStr, bool>;

/// The full compiled model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    /// Tables keyed by name.
    #[serde(default)]
    pub tables: IndexMap<SmolStr, Table>,
    /// Table names in first-declaration order.
    #[serde(default)]
    pub tables_sequence: Vec<SmolStr>,
    /// Per-table authorization policies.
    #[serde(default)]
    pub authorization: IndexMap<SmolStr, AuthorizationPolicy>,
    #[serde(default)]
    pub endpoints: Endpoints,
    /// Per-table PICT view configuration.
    #[serde(default)]
    pub pict: IndexMap<SmolStr, PictEntity>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Get the authorization policy of a table.
    pub fn get_authorization(&self, table: &str) -> Option<&AuthorizationPolicy> {
        self.authorization.get(table)
    }

    /// Get the PICT configuration of a table.
    pub fn get_pict(&self, table: &str) -> Option<&PictEntity> {
        self.pict.get(table)
    }

    /// Iterate tables in first-declaration order.
    ///
    /// Tables missing from the sequence (e.g. in hand-edited JSON) follow in
    /// map order.
    pub fn tables_in_order(&self) -> impl Iterator<Item = &Table> {
        let sequenced = self
            .tables_sequence
            .iter()
            .filter_map(|name| self.tables.get(name));
        let rest = self
            .tables
            .values()
            .filter(|t| !self.tables_sequence.contains(&t.name));
        sequenced.chain(rest)
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    /// Map each identity column name to its table name.
    pub fn identity_index(&self) -> IndexMap<SmolStr, SmolStr> {
        let mut index = IndexMap::new();
        for table in self.tables.values() {
            for column in table.columns.iter().filter(|c| c.is_identity()) {
                index.insert(column.name.clone(), table.name.clone());
            }
        }
        index
    }

    /// View of the model holding only the tables.
    pub fn base(&self) -> BaseModel<'_> {
        BaseModel {
            tables: &self.tables,
        }
    }
}

/// Serialization view of the base artifact: `{ "Tables": ... }`.
#[derive(Debug, Serialize)]
pub struct BaseModel<'a> {
    #[serde(rename = "Tables")]
    pub tables: &'a IndexMap<SmolStr, Table>,
}
