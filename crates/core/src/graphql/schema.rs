use std::collections::BTreeSet;
use std::path::Path;

use super::GraphqlError;

/// An externally authored GraphQL schema, loaded as a text asset.
///
/// The schema's shape is a contract: resolver registrations are checked
/// against the `(type, field)` pairs indexed here, so a mismatch fails at
/// definition time instead of on the first request. Only object `type`
/// blocks are indexed — inputs, enums and interfaces carry no resolvers.
#[derive(Debug, Clone)]
pub struct SchemaAsset {
    definition: String,
    fields: BTreeSet<(String, String)>,
}

impl SchemaAsset {
    /// Loads the schema from a file. A missing or unreadable asset is a
    /// fatal definition-time error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphqlError> {
        let path = path.as_ref();
        let definition =
            std::fs::read_to_string(path).map_err(|source| GraphqlError::SchemaRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_definition(definition)
    }

    /// Indexes an in-memory schema definition.
    pub fn from_definition(definition: impl Into<String>) -> Result<Self, GraphqlError> {
        let definition = definition.into();
        let fields = scan_object_fields(&definition);
        if fields.is_empty() {
            return Err(GraphqlError::EmptySchema);
        }
        Ok(Self { definition, fields })
    }

    /// The raw schema text, shipped verbatim in the rendered template.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// True when the schema declares `field_name` on object `type_name`.
    pub fn has_field(&self, type_name: &str, field_name: &str) -> bool {
        self.fields
            .contains(&(type_name.to_string(), field_name.to_string()))
    }
}

/// Line scanner over object type blocks.
///
/// Deliberately not a full GraphQL parser: it only needs the field names
/// of `type` blocks, and the shipped schemas are machine-checked against
/// the platform separately.
fn scan_object_fields(definition: &str) -> BTreeSet<(String, String)> {
    let mut fields = BTreeSet::new();
    let mut current_type: Option<String> = None;

    for raw_line in definition.lines() {
        let line = raw_line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        if current_type.is_none() {
            if let Some(rest) = line.strip_prefix("type ") {
                let name: String = rest
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                if !name.is_empty() && line.ends_with('{') {
                    current_type = Some(name);
                }
            }
            continue;
        }

        if line.starts_with('}') {
            current_type = None;
            continue;
        }

        let field: String = line
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if !field.is_empty() {
            if let Some(type_name) = &current_type {
                fields.insert((type_name.clone(), field));
            }
        }
    }

    fields
}
