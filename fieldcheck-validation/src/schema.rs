// Runtime descriptors for JSON records

use crate::{RuleError, RuleSet, ValidationError, Validator, WalkError};
use serde_json::{Map, Value};

/// Describes the validated fields of a JSON object, for records that only
/// exist as decoded JSON (no Rust type to derive on).
///
/// ```
/// use fieldcheck_validation::{RecordSchema, Validator};
/// use serde_json::json;
///
/// let address = RecordSchema::builder()
///     .field("zip", "required,len:5")
///     .build();
/// let signup = RecordSchema::builder()
///     .field("email", "required,email")
///     .display("E-mail")
///     .nested("address", address)
///     .build();
///
/// let violations = Validator::new()
///     .validate_json(&signup, &json!({ "email": "nope", "address": { "zip": "123" } }))
///     .unwrap();
/// assert_eq!(
///     violations,
///     vec![
///         "Field 'E-mail' is not a valid email",
///         "Field 'zip' must be exactly 5 characters long",
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSchema {
    fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, PartialEq)]
struct SchemaField {
    name: String,
    display_name: Option<String>,
    kind: SchemaKind,
}

#[derive(Debug, Clone, PartialEq)]
enum SchemaKind {
    Text { spec: String, rules: RuleSet },
    Record(RecordSchema),
}

impl SchemaField {
    fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

impl RecordSchema {
    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field names, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Builder for [`RecordSchema`]. Fields are validated in the order they are added.
#[derive(Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: Vec<SchemaField>,
}

impl RecordSchemaBuilder {
    /// Add a string field with a rule specification.
    pub fn field(mut self, name: impl Into<String>, rules: impl Into<String>) -> Self {
        let spec = rules.into();
        self.fields.push(SchemaField {
            name: name.into(),
            display_name: None,
            kind: SchemaKind::Text {
                rules: RuleSet::parse(&spec),
                spec,
            },
        });
        self
    }

    /// Set the display name of the most recently added field.
    pub fn display(mut self, display_name: impl Into<String>) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.display_name = Some(display_name.into());
        }
        self
    }

    /// Add a nested record, walked whether or not its value is present.
    pub fn nested(mut self, name: impl Into<String>, schema: RecordSchema) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            display_name: None,
            kind: SchemaKind::Record(schema),
        });
        self
    }

    /// Finish, keeping lenient parsing: unknown tokens are ignored.
    pub fn build(self) -> RecordSchema {
        RecordSchema {
            fields: self.fields,
        }
    }

    /// Finish, rejecting unknown tokens and malformed bounds in this schema
    /// and every nested one.
    pub fn try_build(self) -> Result<RecordSchema, RuleError> {
        let schema = self.build();
        check_strict(&schema, "")?;
        Ok(schema)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn check_strict(schema: &RecordSchema, prefix: &str) -> Result<(), RuleError> {
    for field in &schema.fields {
        let path = join(prefix, &field.name);
        match &field.kind {
            SchemaKind::Text { spec, .. } => {
                RuleSet::parse_strict(spec).map_err(|e| e.at(&path))?;
            }
            SchemaKind::Record(nested) => check_strict(nested, &path)?,
        }
    }
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        format!("$.{}", path)
    }
}

impl Validator {
    /// Validate a decoded JSON object against `schema`.
    ///
    /// Missing and `null` string fields are validated as the empty string.
    /// Missing and `null` nested records are validated as an empty object.
    /// Handing over anything that does not have the shape of the schema
    /// (a non-object record, a non-string text field) is an error, as is a
    /// malformed rule specification when `strict_rules` is configured.
    pub fn validate_json(&self, schema: &RecordSchema, value: &Value) -> Result<Vec<String>, WalkError> {
        let Value::Object(map) = value else {
            return Err(WalkError::NotARecord {
                path: display_path(""),
                found: kind_of(value),
            });
        };

        let mut errors = Vec::new();
        self.walk_json(schema, map, "", &mut errors)?;
        Ok(errors.into_iter().map(|e| e.message).collect())
    }

    fn walk_json(
        &self,
        schema: &RecordSchema,
        map: &Map<String, Value>,
        prefix: &str,
        errors: &mut Vec<ValidationError>,
    ) -> Result<(), WalkError> {
        static EMPTY: once_cell::sync::Lazy<Map<String, Value>> =
            once_cell::sync::Lazy::new(Map::new);

        for field in &schema.fields {
            let path = join(prefix, &field.name);
            let value = map.get(&field.name);

            match &field.kind {
                SchemaKind::Record(nested) => {
                    let nested_map = match value {
                        None | Some(Value::Null) => &*EMPTY,
                        Some(Value::Object(inner)) => inner,
                        Some(other) => {
                            return Err(WalkError::NotARecord {
                                path: display_path(&path),
                                found: kind_of(other),
                            });
                        }
                    };
                    self.walk_json(nested, nested_map, &path, errors)?;
                }
                SchemaKind::Text { spec, rules } => {
                    let text = match value {
                        None | Some(Value::Null) => "",
                        Some(Value::String(s)) => s.as_str(),
                        Some(other) => {
                            return Err(WalkError::NotText {
                                path: display_path(&path),
                                found: kind_of(other),
                            });
                        }
                    };

                    if spec.is_empty() {
                        continue;
                    }

                    if self.config().strict_rules {
                        let strict = RuleSet::parse_strict(spec).map_err(|e| e.at(&path))?;
                        self.apply(text, field.label(), &strict, errors);
                    } else {
                        self.apply(text, field.label(), rules, errors);
                    }
                }
            }
        }

        Ok(())
    }
}
