//! # Viper Boot Schema
//!
//! Data model for the viper-boot student API.
//!
//! This crate provides:
//! - **Serde types** for the `Person`, `Student`, `StudentId`, and
//!   `StudentParams` payloads, plus the closed [`Gender`] enumeration
//! - **Static schema descriptors** — an explicit, compile-time field list
//!   per schema type, consumed by both validation and OpenAPI spec
//!   generation
//!
//! ## Quick Start
//!
//! ```rust
//! use viper_boot_schema::{ApiSchema, Gender, Person, Student};
//! use chrono::NaiveDate;
//! use uuid::Uuid;
//!
//! let student = Student {
//!     id: Uuid::new_v4(),
//!     student: Person {
//!         first_name: "James".to_string(),
//!         last_name: "Smith".to_string(),
//!         dob: NaiveDate::from_ymd_opt(1978, 10, 10).unwrap(),
//!         gender: Gender::Male,
//!     },
//! };
//!
//! assert_eq!(student.student.first_name, "James");
//!
//! // The descriptor drives spec generation without runtime introspection.
//! assert_eq!(Student::descriptor().name, "Student");
//! ```

mod descriptor;
mod gender;
mod person;
mod student;

pub use descriptor::{
    ApiSchema, FieldDescriptor, FieldKind, SchemaDescriptor, UnknownFields,
};
pub use gender::Gender;
pub use person::Person;
pub use student::{Student, StudentId, StudentParams};
