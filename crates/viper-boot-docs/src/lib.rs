//! # Viper Boot Docs
//!
//! Handler metadata and OpenAPI documentation for viper-boot services.
//!
//! This crate provides:
//! - **Handler metadata**: a builder that records each handler's HTTP
//!   method, operation metadata, request-schema bindings, and response
//!   bindings
//! - **Documentation registrar**: converts registered metadata into a
//!   complete OpenAPI document, driven by the static schema descriptors
//!   from `viper-boot-schema`
//! - **Viewer and server**: a Swagger UI page embedding the generated
//!   document, served by a minimal single-endpoint HTTP server
//!
//! ## Quick Start
//!
//! ```no_run
//! use viper_boot_docs::{
//!     DocServer, HandlerMetadata, OpenApiRegistry, ResponseBinding,
//!     SchemaBinding, SchemaLocation,
//! };
//! use viper_boot_schema::{ApiSchema, Person, StudentId};
//!
//! # #[tokio::main]
//! # async fn main() -> viper_boot_docs::DocsResult<()> {
//! let mut registry = OpenApiRegistry::from_file("openapi.json")?;
//!
//! let metadata = HandlerMetadata::new()
//!     .method("POST")
//!     .summary("Create student")
//!     .tag("Student")
//!     .request_schema(SchemaBinding::new(
//!         Person::descriptor(),
//!         SchemaLocation::Json,
//!     ))?
//!     .response(201, ResponseBinding::with_schema(StudentId::descriptor()));
//! registry.register("/api/v1/student", metadata)?;
//!
//! registry.write_doc()?;
//! DocServer::new(registry.spec())?.serve().await
//! # }
//! ```

mod error;
mod metadata;
mod openapi;
mod registry;
mod security;
mod server;
mod viewer;

pub use error::{DocsError, DocsResult, MetadataError};
pub use metadata::{HandlerMetadata, ResponseBinding, SchemaBinding, SchemaLocation};
pub use openapi::{
    Components, Header, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Schema, SchemaType, SecurityScheme, Server, ServerVariable,
};
pub use registry::{OpenApiRegistry, DOC_FILE};
pub use security::{api_key, api_key_with_header, jwt, API_KEY_HEADER, API_KEY_SCHEME, JWT_SCHEME};
pub use server::DocServer;
pub use viewer::DocViewer;
