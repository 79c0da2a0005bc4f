//! Handler metadata accumulation.
//!
//! Each documented handler carries a [`HandlerMetadata`] record describing
//! its HTTP method, operation metadata, request-schema bindings, and
//! response bindings. The record is populated through builder methods and
//! consumed by value when the handler is registered with the
//! [`OpenApiRegistry`](crate::OpenApiRegistry), so a record documents
//! exactly one registration.
//!
//! ## Builder semantics
//!
//! - `parameters` and `responses` accumulate across repeated calls;
//! - scalar fields (`method`, `summary`, `description`) overwrite;
//! - at most one request-schema binding may target the json body.
//!
//! ## Usage
//!
//! ```
//! use viper_boot_docs::{HandlerMetadata, SchemaBinding, SchemaLocation};
//! use viper_boot_schema::{ApiSchema, Person};
//!
//! # fn main() -> Result<(), viper_boot_docs::MetadataError> {
//! let metadata = HandlerMetadata::new()
//!     .method("POST")
//!     .summary("Create student")
//!     .tag("Student")
//!     .request_schema(SchemaBinding::new(
//!         Person::descriptor(),
//!         SchemaLocation::Json,
//!     ))?;
//! assert!(!metadata.is_empty());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use viper_boot_schema::SchemaDescriptor;

use crate::error::MetadataError;
use crate::openapi::Parameter;

/// Where a request-schema binding expects its values.
///
/// The set is closed; parsing any other string fails with
/// [`MetadataError::InvalidLocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLocation {
    /// Request cookies.
    Cookies,
    /// Uploaded files (multipart body).
    Files,
    /// Form-encoded body.
    Form,
    /// Request headers.
    Headers,
    /// JSON request body.
    Json,
    /// Route match segments (alias for path).
    MatchInfo,
    /// URL path segments.
    Path,
    /// Query string parameters.
    Query,
    /// Query string parameters (alias for query).
    QueryString,
}

impl SchemaLocation {
    /// Every valid location, in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Cookies,
        Self::Files,
        Self::Form,
        Self::Headers,
        Self::Json,
        Self::MatchInfo,
        Self::Path,
        Self::Query,
        Self::QueryString,
    ];

    /// The canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cookies => "cookies",
            Self::Files => "files",
            Self::Form => "form",
            Self::Headers => "headers",
            Self::Json => "json",
            Self::MatchInfo => "match_info",
            Self::Path => "path",
            Self::Query => "query",
            Self::QueryString => "querystring",
        }
    }

    /// Whether this location is carried in the request body.
    #[must_use]
    pub const fn is_body(self) -> bool {
        matches!(self, Self::Json | Self::Form | Self::Files)
    }
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaLocation {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cookies" => Ok(Self::Cookies),
            "files" => Ok(Self::Files),
            "form" => Ok(Self::Form),
            "headers" => Ok(Self::Headers),
            "json" => Ok(Self::Json),
            "match_info" => Ok(Self::MatchInfo),
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "querystring" => Ok(Self::QueryString),
            other => Err(MetadataError::invalid_location(other)),
        }
    }
}

/// A request-schema binding: one schema expected at one location.
#[derive(Debug, Clone)]
pub struct SchemaBinding {
    /// The schema's static field list.
    pub descriptor: &'static SchemaDescriptor,
    /// Where the values are expected.
    pub location: SchemaLocation,
    /// Key under which parsed data is delivered to the handler.
    pub put_into: Option<String>,
    /// Example payload to attach to the documentation.
    pub example: Option<serde_json::Value>,
    /// Attach the example to the shared component schema instead of inline.
    pub add_to_refs: bool,
    /// Whether the bound data is required.
    pub required: bool,
}

impl SchemaBinding {
    /// Create a new binding for a schema at a location.
    #[must_use]
    pub fn new(descriptor: &'static SchemaDescriptor, location: SchemaLocation) -> Self {
        Self {
            descriptor,
            location,
            put_into: None,
            example: None,
            add_to_refs: false,
            required: true,
        }
    }

    /// Set the key under which parsed data is delivered.
    #[must_use]
    pub fn put_into(mut self, key: impl Into<String>) -> Self {
        self.put_into = Some(key.into());
        self
    }

    /// Attach an example payload.
    #[must_use]
    pub fn example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Attach the example to the shared component schema.
    #[must_use]
    pub fn add_to_refs(mut self, add: bool) -> Self {
        self.add_to_refs = add;
        self
    }

    /// Mark the bound data optional or required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A response binding: an optional schema plus description for one status.
#[derive(Debug, Clone, Default)]
pub struct ResponseBinding {
    /// The response schema, if any.
    pub descriptor: Option<&'static SchemaDescriptor>,
    /// Whether the response body is an array of the schema.
    pub many: bool,
    /// Whether the response body is required.
    pub required: bool,
    /// Human-readable description.
    pub description: Option<String>,
}

impl ResponseBinding {
    /// A schema-less response (status and description only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A response carrying a schema.
    #[must_use]
    pub fn with_schema(descriptor: &'static SchemaDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            many: false,
            required: false,
            description: None,
        }
    }

    /// A response carrying an array of a schema.
    #[must_use]
    pub fn with_schema_list(descriptor: &'static SchemaDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            many: true,
            required: false,
            description: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the response body required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Documentation metadata for a single handler.
///
/// Built once, registered once. See the module docs for builder semantics.
#[derive(Debug, Clone, Default)]
pub struct HandlerMetadata {
    pub(crate) method: Option<String>,
    pub(crate) summary: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) responses: IndexMap<String, ResponseBinding>,
    pub(crate) schemas: Vec<SchemaBinding>,
}

impl HandlerMetadata {
    /// Create an empty metadata record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method. Overwrites any prior value.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the operation summary. Overwrites any prior value.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the operation description. Overwrites any prior value.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a grouping tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append an explicit parameter descriptor. Accumulates.
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Record a response binding for a status code.
    ///
    /// Bindings are keyed by the status code; recording the same code
    /// twice overwrites the prior binding.
    #[must_use]
    pub fn response(mut self, status: u16, binding: ResponseBinding) -> Self {
        self.responses.insert(status.to_string(), binding);
        self
    }

    /// Append a request-schema binding.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::DuplicateJsonBinding`] if a json-location
    /// binding is already recorded; only one request body per handler.
    pub fn request_schema(mut self, binding: SchemaBinding) -> Result<Self, MetadataError> {
        if binding.location == SchemaLocation::Json
            && self
                .schemas
                .iter()
                .any(|b| b.location == SchemaLocation::Json)
        {
            return Err(MetadataError::DuplicateJsonBinding);
        }
        self.schemas.push(binding);
        Ok(self)
    }

    /// Whether no builder method has recorded anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
            && self.parameters.is_empty()
            && self.responses.is_empty()
            && self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use viper_boot_schema::{ApiSchema, Person, StudentParams};

    #[test]
    fn test_all_valid_locations_parse() {
        for location in SchemaLocation::ALL {
            let parsed: SchemaLocation = location.as_str().parse().unwrap();
            assert_eq!(parsed, location);
        }
    }

    #[test]
    fn test_invalid_location_fails() {
        for invalid in ["body", "JSON", "matchinfo", ""] {
            let result = SchemaLocation::from_str(invalid);
            assert!(matches!(
                result,
                Err(MetadataError::InvalidLocation { .. })
            ));
        }
    }

    #[test]
    fn test_body_locations() {
        assert!(SchemaLocation::Json.is_body());
        assert!(SchemaLocation::Form.is_body());
        assert!(SchemaLocation::Files.is_body());
        assert!(!SchemaLocation::Query.is_body());
        assert!(!SchemaLocation::MatchInfo.is_body());
    }

    #[test]
    fn test_new_metadata_is_empty() {
        assert!(HandlerMetadata::new().is_empty());
    }

    #[test]
    fn test_any_builder_call_makes_non_empty() {
        assert!(!HandlerMetadata::new().method("GET").is_empty());
        assert!(!HandlerMetadata::new().tag("Student").is_empty());
        assert!(!HandlerMetadata::new()
            .response(204, ResponseBinding::new())
            .is_empty());
    }

    #[test]
    fn test_scalars_overwrite() {
        let metadata = HandlerMetadata::new().summary("first").summary("second");
        assert_eq!(metadata.summary.as_deref(), Some("second"));
    }

    #[test]
    fn test_responses_keyed_by_status() {
        let metadata = HandlerMetadata::new()
            .response(200, ResponseBinding::new().description("ok"))
            .response(200, ResponseBinding::new().description("replaced"))
            .response(400, ResponseBinding::new().description("bad"));

        assert_eq!(metadata.responses.len(), 2);
        assert_eq!(
            metadata.responses["200"].description.as_deref(),
            Some("replaced")
        );
    }

    #[test]
    fn test_duplicate_json_binding_fails() {
        let result = HandlerMetadata::new()
            .request_schema(SchemaBinding::new(
                Person::descriptor(),
                SchemaLocation::Json,
            ))
            .unwrap()
            .request_schema(SchemaBinding::new(
                Person::descriptor(),
                SchemaLocation::Json,
            ));
        assert!(matches!(result, Err(MetadataError::DuplicateJsonBinding)));
    }

    #[test]
    fn test_json_plus_other_locations_allowed() {
        let metadata = HandlerMetadata::new()
            .request_schema(SchemaBinding::new(
                Person::descriptor(),
                SchemaLocation::Json,
            ))
            .unwrap()
            .request_schema(SchemaBinding::new(
                StudentParams::descriptor(),
                SchemaLocation::MatchInfo,
            ))
            .unwrap();
        assert_eq!(metadata.schemas.len(), 2);
    }

    #[test]
    fn test_schema_binding_options() {
        let binding = SchemaBinding::new(Person::descriptor(), SchemaLocation::Json)
            .put_into("person")
            .example(json!({"first_name": "James"}))
            .add_to_refs(true)
            .required(false);

        assert_eq!(binding.put_into.as_deref(), Some("person"));
        assert!(binding.example.is_some());
        assert!(binding.add_to_refs);
        assert!(!binding.required);
    }
}
