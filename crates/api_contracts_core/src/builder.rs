//! Builder pattern for declaring payload schemas.
//!
//! This module provides ergonomic builders for object schemas and their
//! fields with a fluent API.

use crate::{FieldSchema, TypeSchema, UnknownKeys};

/// Builder for an object [`TypeSchema`].
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ObjectSchemaBuilder, Schema, TypeSchema};
/// use serde_json::json;
///
/// let customer = ObjectSchemaBuilder::new()
///     .field("id", TypeSchema::integer())
///     .field("name", TypeSchema::non_empty_string())
///     .optional("trn", TypeSchema::pattern(r"^\d{15}$"))
///     .build();
///
/// assert!(customer.validate(&json!({"id": 1, "name": "Gulf Steel LLC"})).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<FieldSchema>,
    unknown_keys: UnknownKeys,
}

impl ObjectSchemaBuilder {
    /// Creates a builder for an object that accepts undeclared keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required, non-nullable field.
    pub fn field(mut self, name: impl Into<String>, schema: TypeSchema) -> Self {
        self.fields.push(FieldSchema::new(name, schema));
        self
    }

    /// Adds a field that may be absent.
    pub fn optional(mut self, name: impl Into<String>, schema: TypeSchema) -> Self {
        self.fields.push(FieldSchema::new(name, schema).optional());
        self
    }

    /// Adds a required field that may be `null`.
    pub fn nullable(mut self, name: impl Into<String>, schema: TypeSchema) -> Self {
        self.fields.push(FieldSchema::new(name, schema).nullable());
        self
    }

    /// Adds a fully configured field.
    pub fn field_schema(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple fields.
    pub fn fields(mut self, fields: Vec<FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Rejects keys that were not declared.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Builds the object schema.
    pub fn build(self) -> TypeSchema {
        TypeSchema::Object {
            fields: self.fields,
            unknown_keys: self.unknown_keys,
        }
    }
}

/// Builder for a [`FieldSchema`].
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{FieldBuilder, TypeSchema};
///
/// let field = FieldBuilder::new("dueDate", TypeSchema::string())
///     .description("Payment due date")
///     .optional(true)
///     .build();
/// assert!(field.optional);
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    aliases: Vec<String>,
    schema: TypeSchema,
    optional: bool,
    nullable: bool,
    description: Option<String>,
}

impl FieldBuilder {
    /// Creates a new field builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Field name as it appears in the payload
    /// * `schema` - Schema of the field value
    pub fn new(name: impl Into<String>, schema: TypeSchema) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            schema,
            optional: false,
            nullable: false,
            description: None,
        }
    }

    /// Adds another name the field may appear under.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// Sets whether the field may be absent.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Sets whether the field may be `null`.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the field.
    pub fn build(self) -> FieldSchema {
        FieldSchema {
            name: self.name,
            aliases: self.aliases,
            schema: self.schema,
            optional: self.optional,
            nullable: self.nullable,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_object_builder() {
        let schema = ObjectSchemaBuilder::new()
            .field("id", TypeSchema::integer())
            .optional("notes", TypeSchema::string())
            .nullable("dueDate", TypeSchema::string())
            .build();

        match &schema {
            TypeSchema::Object {
                fields,
                unknown_keys,
            } => {
                assert_eq!(fields.len(), 3);
                assert!(fields[1].optional);
                assert!(fields[2].nullable);
                assert_eq!(*unknown_keys, UnknownKeys::Passthrough);
            }
            other => panic!("expected object schema, got {other:?}"),
        }

        assert!(schema.validate(&json!({"id": 1, "dueDate": null})).is_ok());
        assert!(schema.validate(&json!({"id": 1})).is_err());
    }

    #[test]
    fn test_strict_builder() {
        let schema = ObjectSchemaBuilder::new()
            .field("status", TypeSchema::enumeration(["draft", "issued"]))
            .strict()
            .build();
        assert!(schema.validate(&json!({"status": "draft", "extra": true})).is_err());
    }

    #[test]
    fn test_field_builder() {
        let field = FieldBuilder::new("email", TypeSchema::string())
            .nullable(true)
            .description("Billing contact")
            .build();

        assert_eq!(field.name, "email");
        assert!(field.nullable);
        assert!(!field.optional);
        assert_eq!(field.description, Some("Billing contact".to_string()));
    }
}
