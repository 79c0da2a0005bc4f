//! Documentation registrar.
//!
//! [`OpenApiRegistry`] owns the OpenAPI document: it loads a base spec
//! file, installs the security schemes, converts registered handler
//! metadata into path operations, and persists the assembled document.
//!
//! ## Usage
//!
//! ```no_run
//! use viper_boot_docs::{HandlerMetadata, OpenApiRegistry};
//!
//! # fn main() -> viper_boot_docs::DocsResult<()> {
//! let mut registry = OpenApiRegistry::from_file("openapi.json")?;
//! let metadata = HandlerMetadata::new().method("GET").summary("List students");
//! registry.register("/api/v1/students", metadata)?;
//! registry.write_doc()?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;
use std::process::Command;

use indexmap::IndexMap;
use regex::Regex;

use viper_boot_schema::{FieldDescriptor, FieldKind, SchemaDescriptor};

use crate::error::{DocsError, DocsResult};
use crate::metadata::{HandlerMetadata, ResponseBinding, SchemaBinding, SchemaLocation};
use crate::openapi::{
    MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem, RequestBody, Response,
    Schema,
};
use crate::security;

/// File the generated document is written to, relative to the working
/// directory. Overwritten on each generation.
pub const DOC_FILE: &str = "openapi_spec.json";

/// Version used when no version-control tag is available.
const FALLBACK_VERSION: &str = "0.0.1";

/// The documentation registrar.
///
/// Constructed once at startup and handed to whatever registers routes;
/// no global state.
#[derive(Debug, Clone)]
pub struct OpenApiRegistry {
    spec: OpenApi,
}

impl OpenApiRegistry {
    /// Wrap a base document.
    ///
    /// Overrides `info.version` with the most recent version-control tag
    /// (falling back to `0.0.1`) and installs the `api_key` and `jwt`
    /// security schemes.
    #[must_use]
    pub fn new(mut spec: OpenApi) -> Self {
        spec.info.version = resolve_version();
        spec.components
            .security_schemes
            .insert(security::API_KEY_SCHEME.to_string(), security::api_key());
        spec.components
            .security_schemes
            .insert(security::JWT_SCHEME.to_string(), security::jwt());
        Self { spec }
    }

    /// Load the base document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DocsResult<Self> {
        let content = fs::read_to_string(path)?;
        let spec: OpenApi = serde_json::from_str(&content)?;
        Ok(Self::new(spec))
    }

    /// The assembled document.
    #[must_use]
    pub fn spec(&self) -> &OpenApi {
        &self.spec
    }

    /// Register a handler's metadata under a path.
    ///
    /// Empty metadata is a no-op returning `Ok(false)`. Otherwise the
    /// metadata is consumed: request-schema bindings expand into a request
    /// body or per-field parameters, path-template variables without an
    /// explicit parameter gain a required string path parameter, response
    /// bindings become response objects, and the assembled operation is
    /// stored under `(path, method)`, overwriting any prior entry.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::UnsupportedMethod`] for a method outside the
    /// OpenAPI method set (including a missing method).
    pub fn register(&mut self, path: &str, mut metadata: HandlerMetadata) -> DocsResult<bool> {
        if metadata.is_empty() {
            return Ok(false);
        }

        let method = metadata.method.take().unwrap_or_default().to_lowercase();
        if !PathItem::METHODS.contains(&method.as_str()) {
            return Err(DocsError::unsupported_method(method));
        }

        let mut parameters = std::mem::take(&mut metadata.parameters);
        let mut request_body = None;
        for binding in std::mem::take(&mut metadata.schemas) {
            if binding.location.is_body() {
                request_body = Some(self.body_from_binding(binding));
            } else {
                parameters.extend(self.parameters_from_binding(&binding));
            }
        }
        parameters.extend(path_template_parameters(path, &parameters));

        let mut responses = IndexMap::new();
        for (status, binding) in std::mem::take(&mut metadata.responses) {
            responses.insert(status, self.response_from_binding(binding));
        }

        let operation = Operation {
            summary: metadata.summary.take(),
            description: metadata.description.take(),
            tags: std::mem::take(&mut metadata.tags),
            parameters,
            request_body,
            responses,
        };

        self.spec
            .paths
            .entry(path.to_string())
            .or_default()
            .set_operation(&method, operation);
        tracing::debug!(path, method, "registered operation");
        Ok(true)
    }

    /// Render the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if serialization fails.
    pub fn to_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(&self.spec)?)
    }

    /// Persist the document to [`DOC_FILE`], clobbering any previous file.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if serialization or the write fails.
    pub fn write_doc(&self) -> DocsResult<()> {
        self.write_doc_to(DOC_FILE)
    }

    /// Persist the document to an explicit path, clobbering.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if serialization or the write fails.
    pub fn write_doc_to<P: AsRef<Path>>(&self, path: P) -> DocsResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Record a descriptor (and its nested descriptors) under
    /// `components.schemas`, returning the reference path.
    ///
    /// An existing component entry is kept as-is so examples attached to
    /// it survive later registrations.
    fn register_component(&mut self, descriptor: &'static SchemaDescriptor) -> String {
        for field in descriptor.fields {
            if let FieldKind::Nested(nested) = field.kind {
                self.register_component(nested);
            }
        }
        self.spec
            .components
            .schemas
            .entry(descriptor.name.to_string())
            .or_insert_with(|| descriptor_schema(descriptor));
        component_ref(descriptor.name)
    }

    /// Convert a body-location binding into a request body, attaching its
    /// example per the `add_to_refs` flag.
    fn body_from_binding(&mut self, binding: SchemaBinding) -> RequestBody {
        let ref_path = self.register_component(binding.descriptor);

        let schema = match binding.example {
            Some(example) if binding.add_to_refs => {
                // Shared example on the component schema; a missing
                // component entry is skipped silently.
                if let Some(component) =
                    self.spec.components.schemas.get_mut(binding.descriptor.name)
                {
                    component.example = Some(example);
                }
                Schema::reference(&ref_path)
            }
            Some(example) => {
                // Inline example; a bare $ref would shadow it, so wrap
                // the reference in allOf.
                let mut wrapped = Schema::all_of_reference(&ref_path);
                wrapped.example = Some(example);
                wrapped
            }
            None => Schema::reference(&ref_path),
        };

        let media_type = match binding.location {
            SchemaLocation::Form => "application/x-www-form-urlencoded",
            SchemaLocation::Files => "multipart/form-data",
            _ => "application/json",
        };

        RequestBody {
            description: None,
            required: binding.required,
            content: IndexMap::from([(media_type.to_string(), MediaType::schema(schema))]),
        }
    }

    /// Expand a non-body binding into one parameter per descriptor field.
    fn parameters_from_binding(&mut self, binding: &SchemaBinding) -> Vec<Parameter> {
        debug_assert!(!binding.location.is_body());
        let location = match binding.location {
            SchemaLocation::Path | SchemaLocation::MatchInfo => ParameterIn::Path,
            SchemaLocation::Headers => ParameterIn::Header,
            SchemaLocation::Cookies => ParameterIn::Cookie,
            _ => ParameterIn::Query,
        };

        binding
            .descriptor
            .fields
            .iter()
            .map(|field| {
                if let FieldKind::Nested(nested) = field.kind {
                    self.register_component(nested);
                }
                Parameter {
                    name: field.name.to_string(),
                    location,
                    description: Some(field.description.to_string()),
                    // Path parameters are always required.
                    required: field.required || location == ParameterIn::Path,
                    schema: Some(field_schema(field)),
                }
            })
            .collect()
    }

    /// Convert a response binding, re-attaching the schema reference as
    /// json content when one is present.
    fn response_from_binding(&mut self, binding: ResponseBinding) -> Response {
        let mut response = Response {
            description: binding.description.unwrap_or_default(),
            ..Default::default()
        };
        if let Some(descriptor) = binding.descriptor {
            let ref_path = self.register_component(descriptor);
            let schema = if binding.many {
                Schema::array(Schema::reference(ref_path))
            } else {
                Schema::reference(ref_path)
            };
            response
                .content
                .insert("application/json".to_string(), MediaType::schema(schema));
        }
        response
    }
}

/// Reference path for a named component schema.
fn component_ref(name: &str) -> String {
    format!("#/components/schemas/{name}")
}

/// Object schema built from a descriptor's static field list.
fn descriptor_schema(descriptor: &'static SchemaDescriptor) -> Schema {
    let mut schema = Schema::object();
    for field in descriptor.fields {
        if field.required {
            schema.required.push(field.name.to_string());
        }
        schema
            .properties
            .insert(field.name.to_string(), field_schema(field));
    }
    schema
}

/// Schema for a single descriptor field.
fn field_schema(field: &FieldDescriptor) -> Schema {
    let mut schema = match field.kind {
        FieldKind::Str => Schema::string(),
        FieldKind::Uuid => Schema::string().with_format("uuid"),
        FieldKind::Date => Schema::string().with_format("date"),
        FieldKind::Nested(nested) => Schema::reference(component_ref(nested.name)),
    };
    if !field.description.is_empty() {
        schema.description = Some(field.description.to_string());
    }
    schema.read_only = field.read_only;
    schema.enum_values = field
        .enum_values
        .iter()
        .map(|v| serde_json::Value::String((*v).to_string()))
        .collect();
    schema.default = field
        .default
        .map(|v| serde_json::Value::String(v.to_string()));
    schema
}

/// Required string path parameters for `{name}` template variables not
/// already covered by an explicit path parameter.
fn path_template_parameters(path: &str, existing: &[Parameter]) -> Vec<Parameter> {
    let template = Regex::new(r"\{([^}]+)\}").expect("valid regex");
    template
        .captures_iter(path)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|name| {
            !existing
                .iter()
                .any(|p| p.location == ParameterIn::Path && p.name == *name)
        })
        .map(Parameter::path)
        .collect()
}

/// `info.version` from the most recent version-control tag, falling back
/// to [`FALLBACK_VERSION`].
fn resolve_version() -> String {
    git_tag_version().unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

fn git_tag_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_tag(&output.stdout)
}

fn parse_tag(stdout: &[u8]) -> Option<String> {
    let tag = String::from_utf8_lossy(stdout).trim().to_string();
    (!tag.is_empty()).then_some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use viper_boot_schema::{ApiSchema, Person, Student, StudentParams};

    fn registry() -> OpenApiRegistry {
        OpenApiRegistry::new(OpenApi::new("Student API", "1.0.0"))
    }

    #[test]
    fn test_security_schemes_installed() {
        let registry = registry();
        let schemes = &registry.spec().components.security_schemes;
        assert_eq!(schemes["api_key"].scheme_type, "apiKey");
        assert_eq!(schemes["jwt"].scheme_type, "http");
    }

    #[test]
    fn test_version_is_resolved() {
        let registry = registry();
        assert!(!registry.spec().info.version.is_empty());
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag(b"v1.2.3\n"), Some("v1.2.3".to_string()));
        assert_eq!(parse_tag(b"  \n"), None);
        assert_eq!(parse_tag(b""), None);
    }

    #[test]
    fn test_register_empty_metadata_is_noop() {
        let mut registry = registry();
        let registered = registry
            .register("/api/v1/students", HandlerMetadata::new())
            .unwrap();
        assert!(!registered);
        assert!(registry.spec().paths.is_empty());
    }

    #[test]
    fn test_register_unsupported_method() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new().method("CONNECT").summary("nope");
        let result = registry.register("/api/v1/students", metadata);
        assert!(matches!(result, Err(DocsError::UnsupportedMethod { .. })));
        assert!(registry.spec().paths.is_empty());
    }

    #[test]
    fn test_register_without_method() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new().summary("method missing");
        let result = registry.register("/api/v1/students", metadata);
        assert!(matches!(result, Err(DocsError::UnsupportedMethod { .. })));
    }

    #[test]
    fn test_path_template_parameter_generated() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new().method("GET");
        registry.register("/x/{id}", metadata).unwrap();

        let operation = registry.spec().paths["/x/{id}"].operation("get").unwrap();
        assert_eq!(operation.parameters.len(), 1);

        let param = &operation.parameters[0];
        assert_eq!(param.name, "id");
        assert_eq!(param.location, ParameterIn::Path);
        assert!(param.required);
        assert_eq!(
            param.schema.as_ref().unwrap().schema_type,
            Some(crate::openapi::SchemaType::String)
        );
    }

    #[test]
    fn test_explicit_path_parameter_not_duplicated() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new()
            .method("GET")
            .request_schema(SchemaBinding::new(
                StudentParams::descriptor(),
                SchemaLocation::MatchInfo,
            ))
            .unwrap();
        registry.register("/api/v1/student/{id}", metadata).unwrap();

        let operation = registry.spec().paths["/api/v1/student/{id}"]
            .operation("get")
            .unwrap();
        let id_params: Vec<_> = operation
            .parameters
            .iter()
            .filter(|p| p.name == "id")
            .collect();
        assert_eq!(id_params.len(), 1);
        // The descriptor-driven parameter, not the template fallback.
        assert_eq!(
            id_params[0].schema.as_ref().unwrap().format.as_deref(),
            Some("uuid")
        );
    }

    #[test]
    fn test_json_binding_becomes_request_body() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new()
            .method("POST")
            .request_schema(SchemaBinding::new(
                Person::descriptor(),
                SchemaLocation::Json,
            ))
            .unwrap();
        registry.register("/api/v1/student", metadata).unwrap();

        let operation = registry.spec().paths["/api/v1/student"]
            .operation("post")
            .unwrap();
        let body = operation.request_body.as_ref().unwrap();
        assert!(body.required);
        assert_eq!(
            body.content["application/json"]
                .schema
                .as_ref()
                .unwrap()
                .reference
                .as_deref(),
            Some("#/components/schemas/Person")
        );

        let person = &registry.spec().components.schemas["Person"];
        assert_eq!(
            person.required,
            vec!["first_name", "last_name", "dob", "gender"]
        );
        assert_eq!(person.properties["gender"].enum_values.len(), 2);
    }

    #[test]
    fn test_nested_schema_registered() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new()
            .method("GET")
            .response(200, ResponseBinding::with_schema(Student::descriptor()));
        registry.register("/api/v1/students", metadata).unwrap();

        let schemas = &registry.spec().components.schemas;
        assert!(schemas.contains_key("Student"));
        assert!(schemas.contains_key("Person"));
        assert_eq!(
            schemas["Student"].properties["student"].reference.as_deref(),
            Some("#/components/schemas/Person")
        );
        assert!(schemas["Student"].properties["id"].read_only);
    }

    #[test]
    fn test_inline_example_wraps_reference() {
        let mut registry = registry();
        let example = json!({"first_name": "James"});
        let metadata = HandlerMetadata::new()
            .method("POST")
            .request_schema(
                SchemaBinding::new(Person::descriptor(), SchemaLocation::Json)
                    .example(example.clone()),
            )
            .unwrap();
        registry.register("/api/v1/student", metadata).unwrap();

        let operation = registry.spec().paths["/api/v1/student"]
            .operation("post")
            .unwrap();
        let schema = operation.request_body.as_ref().unwrap().content["application/json"]
            .schema
            .as_ref()
            .unwrap();
        assert!(schema.reference.is_none());
        assert_eq!(
            schema.all_of[0].reference.as_deref(),
            Some("#/components/schemas/Person")
        );
        assert_eq!(schema.example, Some(example));
    }

    #[test]
    fn test_add_to_refs_example_lands_on_component() {
        let mut registry = registry();
        let example = json!({"first_name": "Sarah"});
        let metadata = HandlerMetadata::new()
            .method("POST")
            .request_schema(
                SchemaBinding::new(Person::descriptor(), SchemaLocation::Json)
                    .example(example.clone())
                    .add_to_refs(true),
            )
            .unwrap();
        registry.register("/api/v1/student", metadata).unwrap();

        let component = &registry.spec().components.schemas["Person"];
        assert_eq!(component.example, Some(example));

        // The endpoint keeps a plain reference.
        let operation = registry.spec().paths["/api/v1/student"]
            .operation("post")
            .unwrap();
        let schema = operation.request_body.as_ref().unwrap().content["application/json"]
            .schema
            .as_ref()
            .unwrap();
        assert!(schema.reference.is_some());
    }

    #[test]
    fn test_list_response_wraps_in_array() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new()
            .method("GET")
            .response(200, ResponseBinding::with_schema_list(Student::descriptor()));
        registry.register("/api/v1/students", metadata).unwrap();

        let operation = registry.spec().paths["/api/v1/students"]
            .operation("get")
            .unwrap();
        let schema = operation.responses["200"].content["application/json"]
            .schema
            .as_ref()
            .unwrap();
        assert_eq!(schema.schema_type, Some(crate::openapi::SchemaType::Array));
        assert_eq!(
            schema.items.as_ref().unwrap().reference.as_deref(),
            Some("#/components/schemas/Student")
        );
    }

    #[test]
    fn test_response_without_schema_passes_through() {
        let mut registry = registry();
        let metadata = HandlerMetadata::new()
            .method("DELETE")
            .response(204, ResponseBinding::new().description("Deleted"));
        registry.register("/api/v1/student/{id}", metadata).unwrap();

        let operation = registry.spec().paths["/api/v1/student/{id}"]
            .operation("delete")
            .unwrap();
        let response = &operation.responses["204"];
        assert_eq!(response.description, "Deleted");
        assert!(response.content.is_empty());
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = registry();
        registry
            .register(
                "/api/v1/students",
                HandlerMetadata::new().method("GET").summary("first"),
            )
            .unwrap();
        registry
            .register(
                "/api/v1/students",
                HandlerMetadata::new().method("GET").summary("second"),
            )
            .unwrap();

        assert_eq!(registry.spec().paths.len(), 1);
        let operation = registry.spec().paths["/api/v1/students"]
            .operation("get")
            .unwrap();
        assert_eq!(operation.summary.as_deref(), Some("second"));
    }

    #[test]
    fn test_write_doc_clobbers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("openapi_spec.json");
        fs::write(&path, "stale").unwrap();

        let registry = registry();
        registry.write_doc_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Student API"));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("openapi.json");
        fs::write(
            &path,
            serde_json::to_string(&OpenApi::new("Student API", "1.0.0")).unwrap(),
        )
        .unwrap();

        let registry = OpenApiRegistry::from_file(&path).unwrap();
        assert_eq!(registry.spec().info.title, "Student API");
        assert!(registry
            .spec()
            .components
            .security_schemes
            .contains_key("jwt"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = OpenApiRegistry::from_file("/nonexistent/openapi.json");
        assert!(matches!(result, Err(DocsError::IoError(_))));
    }
}
