//! Documented REST surface.
//!
//! Declares the five student routes and registers their metadata with the
//! documentation registrar. The surface is declarative: the doc server
//! does not route API calls.

use serde_json::json;
use viper_boot_docs::{
    DocsResult, HandlerMetadata, MetadataError, OpenApiRegistry, ResponseBinding, SchemaBinding,
    SchemaLocation,
};
use viper_boot_schema::{ApiSchema, Person, Student, StudentId, StudentParams};

/// Collection path.
pub const STUDENTS_PATH: &str = "/api/v1/students";

/// Creation path.
pub const STUDENT_PATH: &str = "/api/v1/student";

/// Single-record path.
pub const STUDENT_ID_PATH: &str = "/api/v1/student/{id}";

/// Register all five student routes.
///
/// # Errors
///
/// Returns `DocsError` if any metadata is rejected.
pub fn register_routes(registry: &mut OpenApiRegistry) -> DocsResult<()> {
    registry.register(STUDENTS_PATH, list_students()?)?;
    registry.register(STUDENT_ID_PATH, get_student()?)?;
    registry.register(STUDENT_PATH, create_student()?)?;
    registry.register(STUDENT_ID_PATH, update_student()?)?;
    registry.register(STUDENT_ID_PATH, delete_student()?)?;
    Ok(())
}

/// Error responses documented on every route.
fn with_error_responses(metadata: HandlerMetadata) -> HandlerMetadata {
    metadata
        .response(400, ResponseBinding::new().description("Bad request."))
        .response(401, ResponseBinding::new().description("Unauthorized."))
        .response(422, ResponseBinding::new().description("Validation error."))
        .response(500, ResponseBinding::new().description("Server error."))
}

fn list_students() -> Result<HandlerMetadata, MetadataError> {
    Ok(with_error_responses(
        HandlerMetadata::new()
            .method("GET")
            .tag("Student")
            .summary("List students")
            .description("Fetch every student record.")
            .response(
                200,
                ResponseBinding::with_schema_list(Student::descriptor())
                    .description("List of students."),
            ),
    ))
}

fn get_student() -> Result<HandlerMetadata, MetadataError> {
    Ok(with_error_responses(
        HandlerMetadata::new()
            .method("GET")
            .tag("Student")
            .summary("Get student")
            .description("Fetch one student record by id.")
            .request_schema(SchemaBinding::new(
                StudentParams::descriptor(),
                SchemaLocation::MatchInfo,
            ))?
            .response(
                200,
                ResponseBinding::with_schema(Student::descriptor()).description("The student."),
            ),
    ))
}

fn create_student() -> Result<HandlerMetadata, MetadataError> {
    Ok(with_error_responses(
        HandlerMetadata::new()
            .method("POST")
            .tag("Student")
            .summary("Create student")
            .description("Create a student record from a person payload.")
            .request_schema(
                SchemaBinding::new(Person::descriptor(), SchemaLocation::Json)
                    .example(json!({
                        "first_name": "James",
                        "last_name": "Smith",
                        "dob": "1978-10-10",
                        "gender": "MALE",
                    }))
                    .add_to_refs(true),
            )?
            .response(
                201,
                ResponseBinding::with_schema(StudentId::descriptor())
                    .description("Created student id."),
            ),
    ))
}

fn update_student() -> Result<HandlerMetadata, MetadataError> {
    Ok(with_error_responses(
        HandlerMetadata::new()
            .method("PATCH")
            .tag("Student")
            .summary("Update student")
            .description("Update one student record by id.")
            .request_schema(SchemaBinding::new(
                StudentParams::descriptor(),
                SchemaLocation::MatchInfo,
            ))?
            .request_schema(SchemaBinding::new(
                Person::descriptor(),
                SchemaLocation::Json,
            ))?
            .response(
                200,
                ResponseBinding::with_schema(Student::descriptor())
                    .description("The updated student."),
            ),
    ))
}

fn delete_student() -> Result<HandlerMetadata, MetadataError> {
    Ok(with_error_responses(
        HandlerMetadata::new()
            .method("DELETE")
            .tag("Student")
            .summary("Delete student")
            .description("Remove one student record by id.")
            .request_schema(SchemaBinding::new(
                StudentParams::descriptor(),
                SchemaLocation::MatchInfo,
            ))?
            .response(204, ResponseBinding::new().description("Deleted.")),
    ))
}
