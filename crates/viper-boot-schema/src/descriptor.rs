//! Static schema descriptors.
//!
//! Each schema type exposes an explicit, compile-time list of its fields
//! through the [`ApiSchema`] trait. The descriptor is the single source of
//! truth for both validation behavior (unknown-field handling) and OpenAPI
//! spec generation (parameter expansion, component schemas), replacing any
//! runtime introspection of the serde types.

/// The shape of a single schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain string.
    Str,
    /// A UUID, rendered as `string` / `format: uuid`.
    Uuid,
    /// A calendar date, rendered as `string` / `format: date`.
    Date,
    /// A nested object described by another schema descriptor.
    Nested(&'static SchemaDescriptor),
}

/// How a schema treats incoming fields it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFields {
    /// Unknown fields are accepted and ignored (permissive parsing).
    Include,
    /// Unknown fields fail deserialization.
    Reject,
}

/// A single declared field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as it appears on the wire.
    pub name: &'static str,
    /// Field shape.
    pub kind: FieldKind,
    /// Whether the field must be present on input.
    pub required: bool,
    /// Whether the field is server-generated and read-only to clients.
    pub read_only: bool,
    /// Human-readable description for generated documentation.
    pub description: &'static str,
    /// Closed value set, when the field is an enumeration.
    pub enum_values: &'static [&'static str],
    /// Documented default value, if any.
    pub default: Option<&'static str>,
}

impl FieldDescriptor {
    /// A required field with no extras.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            read_only: false,
            description,
            enum_values: &[],
            default: None,
        }
    }

    /// An optional field with no extras.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            read_only: false,
            description,
            enum_values: &[],
            default: None,
        }
    }

    /// A server-generated field, read-only to clients.
    #[must_use]
    pub const fn read_only(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            read_only: true,
            description,
            enum_values: &[],
            default: None,
        }
    }

    /// Restrict the field to a closed value set.
    #[must_use]
    pub const fn with_enum(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = values;
        self
    }

    /// Record a documented default value.
    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// A named set of typed fields.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Component name used in generated documentation (no `Schema` suffix).
    pub name: &'static str,
    /// Declared fields, in wire order.
    pub fields: &'static [FieldDescriptor],
    /// Unknown-field handling on input.
    pub unknown_fields: UnknownFields,
}

impl SchemaDescriptor {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields that must be present on input.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }
}

/// A type with a static schema descriptor.
pub trait ApiSchema {
    /// The descriptor for this schema type.
    fn descriptor() -> &'static SchemaDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    static NESTED: SchemaDescriptor = SchemaDescriptor {
        name: "Inner",
        fields: &[FieldDescriptor::required("value", FieldKind::Str, "Value")],
        unknown_fields: UnknownFields::Reject,
    };

    static OUTER: SchemaDescriptor = SchemaDescriptor {
        name: "Outer",
        fields: &[
            FieldDescriptor::read_only("id", FieldKind::Uuid, "Id"),
            FieldDescriptor::required("inner", FieldKind::Nested(&NESTED), "Inner"),
            FieldDescriptor::optional("note", FieldKind::Str, "Note"),
        ],
        unknown_fields: UnknownFields::Include,
    };

    #[test]
    fn test_field_lookup() {
        assert!(OUTER.field("id").is_some());
        assert!(OUTER.field("missing").is_none());
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(OUTER.required_fields(), vec!["inner"]);
        assert_eq!(NESTED.required_fields(), vec!["value"]);
    }

    #[test]
    fn test_read_only_flag() {
        assert!(OUTER.field("id").unwrap().read_only);
        assert!(!OUTER.field("note").unwrap().read_only);
    }

    #[test]
    fn test_enum_and_default_builders() {
        const FIELD: FieldDescriptor =
            FieldDescriptor::required("gender", FieldKind::Str, "Gender")
                .with_enum(&["MALE", "FEMALE"])
                .with_default("MALE");
        assert_eq!(FIELD.enum_values, &["MALE", "FEMALE"]);
        assert_eq!(FIELD.default, Some("MALE"));
    }

    #[test]
    fn test_nested_descriptor_reachable() {
        match OUTER.field("inner").unwrap().kind {
            FieldKind::Nested(inner) => assert_eq!(inner.name, "Inner"),
            _ => panic!("expected nested field"),
        }
    }
}
