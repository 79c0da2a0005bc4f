//! # Viper Boot
//!
//! Student records CRUD API boilerplate.
//!
//! This crate wires the workspace together:
//! - **Service**: [`StudentApi`] and the placeholder [`StudentService`]
//! - **Controller**: [`StudentController`], schema (de)serialization at
//!   the boundary of the service calls
//! - **Routes**: the five documented student endpoints, registered with
//!   the `viper-boot-docs` registrar
//! - **Bootstrap**: banner, logging, and the CLI entry point
//!
//! ## Quick Start
//!
//! ```no_run
//! use viper_boot::{StudentController, StudentService};
//! use uuid::Uuid;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), viper_boot::ServiceError> {
//! let service = StudentService::new("https://httpbin.org/get")?;
//! let controller = StudentController::new(service);
//! let student = controller.get(Uuid::new_v4()).await?;
//! println!("{student}");
//! # Ok(())
//! # }
//! ```

pub mod banner;
pub mod controller;
pub mod error;
pub mod logging;
pub mod routes;
pub mod service;

pub use controller::StudentController;
pub use error::{AppError, ServiceError};
pub use logging::{init_logging, LogConfig};
pub use service::{StudentApi, StudentService};
