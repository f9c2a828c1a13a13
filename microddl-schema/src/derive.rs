//! Secondary schema derivation.
//!
//! Runs once parsing has finished and attaches a [`DerivedSchema`] to every
//! table: identifier detection, type tags, a zero-valued default record and a
//! JSON-Schema fragment.

use indexmap::IndexMap;
use serde_json::Value;
use smol_str::SmolStr;
use tracing::{debug, info};

use crate::ast::{
    AuthorizationPolicy, Column, DataType, DerivedSchema, JsonSchemaFragment, JsonSchemaProperty,
    Model, SchemaEntry, SchemaType, Table,
};

/// Size reported for columns declared without one.
pub const DEFAULT_SIZE: &str = "Default";

/// Zero GUID used as the default value of GUID columns.
pub const ZERO_GUID: &str = "0x0000000000000000";

/// JSON-Schema `type` of a column kind.
pub fn json_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Identity | DataType::ForeignKey | DataType::Numeric => "integer",
        DataType::Decimal => "number",
        DataType::Guid | DataType::String | DataType::Text | DataType::DateTime => "string",
        DataType::Boolean => "boolean",
    }
}

/// Value a fresh record holds for a column kind.
pub fn default_value(data_type: DataType) -> Value {
    match data_type {
        DataType::Identity | DataType::ForeignKey | DataType::Numeric => Value::from(0),
        DataType::Decimal => Value::from(0.0),
        DataType::Guid => Value::from(ZERO_GUID),
        DataType::String | DataType::Text => Value::from(""),
        DataType::DateTime => Value::Null,
        DataType::Boolean => Value::Bool(false),
    }
}

/// Check if a JSON-Schema validator should require the column.
fn is_required(data_type: DataType) -> bool {
    matches!(data_type, DataType::Identity | DataType::ForeignKey)
}

fn schema_type(column: &Column) -> SchemaType {
    match column.change_tracking() {
        Some(role) => SchemaType::for_change_tracking(role),
        None => SchemaType::for_data_type(column.data_type),
    }
}

/// Derive the secondary schema of one table.
///
/// The returned schema's JSON-Schema fragment embeds a copy of `table` whose
/// own derived schema has no fragment.
pub fn derive_schema(table: &Table, authorization: Option<&AuthorizationPolicy>) -> DerivedSchema {
    let mut schema = Vec::with_capacity(table.columns.len());
    let mut default_object = IndexMap::new();
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for column in &table.columns {
        let size = column
            .size
            .clone()
            .unwrap_or_else(|| SmolStr::new_static(DEFAULT_SIZE));

        schema.push(SchemaEntry {
            column: column.name.clone(),
            kind: schema_type(column),
            size: size.clone(),
        });
        default_object.insert(column.name.clone(), default_value(column.data_type));
        properties.insert(
            column.name.clone(),
            JsonSchemaProperty {
                kind: SmolStr::new_static(json_type(column.data_type)),
                size,
            },
        );
        if is_required(column.data_type) {
            required.push(column.name.clone());
        }
    }

    let mut derived = DerivedSchema {
        scope: table.name.clone(),
        default_identifier: table.default_identifier(),
        domain: table.domain.clone(),
        schema,
        default_object,
        json_schema: None,
        authorization: authorization.cloned().unwrap_or_default(),
    };

    let mut embedded = table.clone();
    embedded.derived_schema = Some(derived.clone());

    derived.json_schema = Some(JsonSchemaFragment {
        title: table.name.clone(),
        kind: SmolStr::new_static("object"),
        properties,
        required,
        table: Some(Box::new(embedded)),
    });
    derived
}

/// Attach a derived schema to every table of the model.
pub fn derive_all(model: &mut Model) {
    info!(tables = model.tables.len(), "auto-generating derived schemas");

    let Model {
        tables,
        authorization,
        ..
    } = model;
    for table in tables.values_mut() {
        // A previous derivation must not end up inside the embedded copy.
        table.derived_schema = None;
        let derived = derive_schema(table, authorization.get(&table.name));
        debug!(
            table = %table.name,
            identifier = %derived.default_identifier,
            columns = derived.schema.len(),
            "derived schema"
        );
        table.derived_schema = Some(derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Authorizer, DEFAULT_DOMAIN};
    use crate::parser::parse_mddl;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_table() -> Table {
        let mut table = Table::new("User", DEFAULT_DOMAIN);
        table.columns.push(Column::new("IDUser", DataType::Identity));
        table.columns.push(Column::new("UserName", DataType::String).with_size("32"));
        table.columns.push(Column::new("CreateDate", DataType::DateTime));
        table
    }

    #[test]
    fn test_change_tracking_overrides_type_tag() {
        let derived = derive_schema(&user_table(), None);
        assert_eq!(derived.default_identifier, "IDUser");
        assert_eq!(derived.entry("IDUser").unwrap().kind, SchemaType::AutoIdentity);
        assert_eq!(derived.entry("UserName").unwrap().kind, SchemaType::String);
        assert_eq!(derived.entry("CreateDate").unwrap().kind, SchemaType::CreateDate);
        assert_eq!(derived.entry("IDUser").unwrap().size, DEFAULT_SIZE);
        assert_eq!(derived.entry("UserName").unwrap().size, "32");
    }

    #[test]
    fn test_magic_name_wins_over_declared_kind() {
        let mut table = Table::new("Book", DEFAULT_DOMAIN);
        table.columns.push(Column::new("CreatingIDUser", DataType::Numeric));
        table.columns.push(Column::new("Deleted", DataType::Boolean));

        let derived = derive_schema(&table, None);
        let value = serde_json::to_value(&derived.schema).unwrap();
        assert_eq!(
            value,
            json!([
                { "Column": "CreatingIDUser", "Type": "CreateIDUser", "Size": "int" },
                { "Column": "Deleted", "Type": "Deleted", "Size": "Default" }
            ])
        );
        assert_eq!(derived.default_identifier, "IDBook");
    }

    #[test]
    fn test_default_object_and_json_schema() {
        let result = parse_mddl(
            "!Item\n@IDItem\n%GUIDItem\n~IDOwner\n#Count\n.Price\n$Name\n*Notes\n&Seen\n^Active\n",
        )
        .unwrap();
        let derived = derive_schema(&result.model.tables["Item"], None);

        assert_eq!(
            serde_json::to_value(&derived.default_object).unwrap(),
            json!({
                "IDItem": 0,
                "GUIDItem": ZERO_GUID,
                "IDOwner": 0,
                "Count": 0,
                "Price": 0.0,
                "Name": "",
                "Notes": "",
                "Seen": null,
                "Active": false
            })
        );

        let fragment = derived.json_schema.as_ref().unwrap();
        assert_eq!(fragment.title, "Item");
        assert_eq!(fragment.kind, "object");
        assert_eq!(fragment.required, vec!["IDItem", "IDOwner"]);
        let types: Vec<_> = fragment.properties.values().map(|p| p.kind.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "integer", "string", "integer", "integer", "number", "string", "string",
                "string", "boolean"
            ]
        );
        assert_eq!(fragment.properties["Name"].size, "64");
    }

    #[test]
    fn test_embedded_table_has_no_nested_fragment() {
        let derived = derive_schema(&user_table(), None);
        let embedded = derived.json_schema.as_ref().unwrap().table.as_ref().unwrap();
        assert_eq!(embedded.name, "User");
        assert_eq!(embedded.columns.len(), 3);

        let nested = embedded.derived_schema.as_ref().unwrap();
        assert!(nested.json_schema.is_none());
        assert_eq!(nested.default_identifier, "IDUser");
    }

    #[test]
    fn test_derive_all_copies_authorization() {
        let mut result = parse_mddl("!User\n@IDUser\n\n[Authorization User]\nRead * Deny\n").unwrap();
        derive_all(&mut result.model);

        let derived = result.model.tables["User"].derived_schema.as_ref().unwrap();
        assert_eq!(derived.scope, "User");
        assert_eq!(derived.domain, DEFAULT_DOMAIN);
        assert_eq!(
            derived.authorization.get("User", "Read"),
            Some(&Authorizer::Deny)
        );
    }

    #[test]
    fn test_derive_all_is_repeatable() {
        let mut result = parse_mddl("!User\n@IDUser\n").unwrap();
        derive_all(&mut result.model);
        let first = result.model.clone();
        derive_all(&mut result.model);
        assert_eq!(result.model, first);
    }
}
