/// Request/response transformation template attached to a resolver.
///
/// The text is the managed platform's template language and passes
/// through this crate verbatim; template mistakes only surface when the
/// resolver is invoked at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTemplate(String);

impl MappingTemplate {
    /// Wraps hand-written template text.
    pub fn from_string(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Point read of one record, keyed by the named request argument.
    pub fn get_item(key_name: &str, arg_name: &str) -> Self {
        Self(format!(
            r#"{{
  "version": "2017-02-28",
  "operation": "GetItem",
  "key": {{
    "{key_name}": $util.dynamodb.toDynamoDBJson($ctx.args.{arg_name})
  }}
}}"#
        ))
    }

    /// Insert of one record with the given key source and attribute values.
    pub fn put_item(key: PrimaryKey, values: Values) -> Self {
        Self(format!(
            r#"{{
  "version": "2017-02-28",
  "operation": "PutItem",
  "key": {{
    "{}": $util.dynamodb.toDynamoDBJson({})
  }},
  "attributeValues": $util.dynamodb.toMapValuesJson($ctx.args.{})
}}"#,
            key.name,
            key.source.expression(),
            values.arg
        ))
    }

    /// Passes the platform's result straight back to the caller.
    pub fn result_item() -> Self {
        Self("$util.toJson($ctx.result)".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeySource {
    Auto,
    Argument(String),
}

impl KeySource {
    fn expression(&self) -> String {
        match self {
            Self::Auto => "$util.autoId()".to_string(),
            Self::Argument(arg) => format!("$ctx.args.{arg}"),
        }
    }
}

/// The partition key of an insert, either auto-generated or taken from a
/// request argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    name: String,
    source: KeySource,
}

impl PrimaryKey {
    /// Starts describing the partition key named `name`.
    pub fn partition(name: impl Into<String>) -> PrimaryKeyBuilder {
        PrimaryKeyBuilder { name: name.into() }
    }
}

/// Builder for [`PrimaryKey`].
#[derive(Debug)]
pub struct PrimaryKeyBuilder {
    name: String,
}

impl PrimaryKeyBuilder {
    /// The platform generates the key value on insert.
    pub fn auto(self) -> PrimaryKey {
        PrimaryKey {
            name: self.name,
            source: KeySource::Auto,
        }
    }

    /// The key value is read from the named request argument.
    pub fn from_argument(self, arg: impl Into<String>) -> PrimaryKey {
        PrimaryKey {
            name: self.name,
            source: KeySource::Argument(arg.into()),
        }
    }
}

/// Attribute values projected from one request argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    arg: String,
}

impl Values {
    /// Projects every field of the named argument onto the record.
    pub fn projecting(arg: impl Into<String>) -> Self {
        Self { arg: arg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_item_template() {
        let template = MappingTemplate::get_item("id", "id");

        assert!(template.as_str().contains(r#""operation": "GetItem""#));
        assert!(template
            .as_str()
            .contains(r#""id": $util.dynamodb.toDynamoDBJson($ctx.args.id)"#));
    }

    #[test]
    fn test_put_item_with_auto_key() {
        let template = MappingTemplate::put_item(
            PrimaryKey::partition("id").auto(),
            Values::projecting("input"),
        );

        assert!(template.as_str().contains(r#""operation": "PutItem""#));
        assert!(template
            .as_str()
            .contains(r#""id": $util.dynamodb.toDynamoDBJson($util.autoId())"#));
        assert!(template
            .as_str()
            .contains("$util.dynamodb.toMapValuesJson($ctx.args.input)"));
    }

    #[test]
    fn test_put_item_with_argument_key() {
        let template = MappingTemplate::put_item(
            PrimaryKey::partition("id").from_argument("id"),
            Values::projecting("input"),
        );

        assert!(template
            .as_str()
            .contains(r#""id": $util.dynamodb.toDynamoDBJson($ctx.args.id)"#));
    }

    #[test]
    fn test_result_item_template() {
        assert_eq!(
            MappingTemplate::result_item().as_str(),
            "$util.toJson($ctx.result)"
        );
    }
}
