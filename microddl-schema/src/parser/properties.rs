//! Parser for the small property grammar used inside PICT stanzas.
//!
//! ```text
//! (List of <%= EntityName %>s)          title template
//! :RowMenu=false                        single property
//! UserName Label:"Login Name" Width:20  column with key:value attributes
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Value of a `:Name=value` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    fn parse(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<PropertyValue> for serde_json::Value {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(b) => serde_json::Value::Bool(b),
            PropertyValue::Text(text) => serde_json::Value::String(text),
        }
    }
}

/// What a PICT stanza line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexLine {
    /// `(template)`; the interior text, verbatim.
    Title(String),
    /// `:Name=value`
    Property { name: String, value: PropertyValue },
    /// `Column key:value ...`; the attributes after the first token.
    ///
    /// The first token is skipped; the caller supplies the column name.
    ValueSet(IndexMap<SmolStr, String>),
    /// A `:` line without `=`, or with an empty property name.
    MalformedProperty,
}

/// Parse one trimmed PICT stanza line.
pub fn parse_complex_properties(line: &str) -> ComplexLine {
    if line.len() >= 2 && line.starts_with('(') && line.ends_with(')') {
        return ComplexLine::Title(line[1..line.len() - 1].to_string());
    }

    if let Some(assignment) = line.strip_prefix(':') {
        let Some((name, value)) = assignment.split_once('=') else {
            return ComplexLine::MalformedProperty;
        };
        let name = name.trim();
        if name.is_empty() {
            return ComplexLine::MalformedProperty;
        }
        return ComplexLine::Property {
            name: name.to_string(),
            value: PropertyValue::parse(value.trim()),
        };
    }

    ComplexLine::ValueSet(scan_value_set(line))
}

/// Scan `key:value` pairs separated by unquoted spaces.
///
/// Double quotes toggle quoting and are dropped; the first `:` of a token
/// separates key from value. Tokens without a key are discarded.
fn scan_value_set(line: &str) -> IndexMap<SmolStr, String> {
    let mut entries = IndexMap::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut token = 0usize;
    let mut in_key = true;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            ' ' if !in_quotes => {
                if token > 0 && !key.is_empty() {
                    entries.insert(SmolStr::new(&key), std::mem::take(&mut value));
                }
                token += 1;
                key.clear();
                value.clear();
                in_key = true;
            }
            '"' => in_quotes = !in_quotes,
            ':' if in_key => in_key = false,
            _ if in_key => key.push(ch),
            _ => value.push(ch),
        }
    }
    if token > 0 && !key.is_empty() {
        entries.insert(SmolStr::new(&key), value);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value_set(line: &str) -> IndexMap<SmolStr, String> {
        match parse_complex_properties(line) {
            ComplexLine::ValueSet(entries) => entries,
            other => panic!("Expected value set, got {:?}", other),
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(
            parse_complex_properties("(List of <%= EntityName %>s)"),
            ComplexLine::Title("List of <%= EntityName %>s".to_string())
        );
        assert_eq!(
            parse_complex_properties("()"),
            ComplexLine::Title(String::new())
        );
    }

    #[test]
    fn test_property_coercion() {
        assert_eq!(
            parse_complex_properties(":Enabled=false"),
            ComplexLine::Property {
                name: "Enabled".to_string(),
                value: PropertyValue::Bool(false)
            }
        );
        assert_eq!(
            parse_complex_properties(": RowMenu = true"),
            ComplexLine::Property {
                name: "RowMenu".to_string(),
                value: PropertyValue::Bool(true)
            }
        );
        assert_eq!(
            parse_complex_properties(":ConfirmationMessage=Really = sure?"),
            ComplexLine::Property {
                name: "ConfirmationMessage".to_string(),
                value: PropertyValue::Text("Really = sure?".to_string())
            }
        );
    }

    #[test]
    fn test_malformed_property() {
        assert_eq!(
            parse_complex_properties(":Enabled"),
            ComplexLine::MalformedProperty
        );
        assert_eq!(
            parse_complex_properties(":=true"),
            ComplexLine::MalformedProperty
        );
    }

    #[test]
    fn test_value_set_skips_first_token() {
        let entries = value_set("UserName Label:Login Width:20");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["Label"], "Login");
        assert_eq!(entries["Width"], "20");
        assert!(value_set("UserName").is_empty());
    }

    #[test]
    fn test_value_set_quotes() {
        let entries = value_set(r#"UserName Label:"Login Name" Help:"a: b""#);
        assert_eq!(entries["Label"], "Login Name");
        assert_eq!(entries["Help"], "a: b");
    }

    #[test]
    fn test_value_set_keeps_declaration_order() {
        let entries = value_set("Email Zeta:1 Alpha:2");
        let keys: Vec<_> = entries.keys().map(SmolStr::as_str).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_value_set_key_without_value() {
        let entries = value_set("Email Sortable");
        assert_eq!(entries["Sortable"], "");
    }
}
