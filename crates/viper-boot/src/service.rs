//! Student service.
//!
//! [`StudentApi`] is the seam between controller and service. The shipped
//! implementation, [`StudentService`], is a placeholder: every operation
//! performs one outbound GET to the configured URL (whose response body is
//! ignored), then returns deterministic sample data. Failures on the
//! outbound call propagate unretried. A real deployment would put a
//! persistence or upstream-service client behind the same trait.

use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use viper_boot_schema::{Gender, Person, Student, StudentId};

use crate::error::ServiceError;

/// Connect timeout for the placeholder outbound call.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(3050);

/// Read timeout for the placeholder outbound call.
const READ_TIMEOUT: Duration = Duration::from_secs(27);

/// The student operations surface.
#[allow(async_fn_in_trait)]
pub trait StudentApi {
    /// Fetch one student record.
    async fn get(&self, id: Uuid) -> Result<Student, ServiceError>;

    /// Fetch all student records.
    async fn get_all(&self) -> Result<Vec<Student>, ServiceError>;

    /// Create a student, returning the new identifier.
    async fn post(&self, person: Person) -> Result<StudentId, ServiceError>;

    /// Update a student, returning the updated record.
    async fn patch(&self, id: Uuid, person: Person) -> Result<Student, ServiceError>;

    /// Remove a student.
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// Placeholder implementation of [`StudentApi`].
#[derive(Debug, Clone)]
pub struct StudentService {
    client: reqwest::Client,
    url: String,
}

impl StudentService {
    /// Create a service calling the given placeholder URL.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the HTTP client cannot be constructed.
    pub fn new(url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The configured placeholder URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// One outbound GET whose response body is ignored; non-2xx and
    /// network failures propagate.
    async fn placeholder_call(&self) -> Result<(), ServiceError> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl StudentApi for StudentService {
    async fn get(&self, id: Uuid) -> Result<Student, ServiceError> {
        self.placeholder_call().await?;
        tracing::debug!(%id, "returning sample student");
        Ok(Student {
            id: Uuid::new_v4(),
            student: james_smith(),
        })
    }

    async fn get_all(&self) -> Result<Vec<Student>, ServiceError> {
        self.placeholder_call().await?;
        tracing::debug!("returning sample student list");
        Ok(vec![
            Student {
                id: Uuid::new_v4(),
                student: james_smith(),
            },
            Student {
                id: Uuid::new_v4(),
                student: sarah_smith(),
            },
        ])
    }

    async fn post(&self, person: Person) -> Result<StudentId, ServiceError> {
        self.placeholder_call().await?;
        tracing::debug!(first_name = %person.first_name, "created sample student");
        Ok(StudentId { id: Uuid::new_v4() })
    }

    async fn patch(&self, id: Uuid, person: Person) -> Result<Student, ServiceError> {
        self.placeholder_call().await?;
        tracing::debug!(%id, "updated sample student");
        Ok(Student {
            id,
            student: person,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.placeholder_call().await?;
        tracing::debug!(%id, "deleted sample student");
        Ok(())
    }
}

fn james_smith() -> Person {
    Person {
        first_name: "James".to_string(),
        last_name: "Smith".to_string(),
        dob: NaiveDate::from_ymd_opt(1978, 10, 10).expect("valid date"),
        gender: Gender::Male,
    }
}

fn sarah_smith() -> Person {
    Person {
        first_name: "Sarah".to_string(),
        last_name: "Smith".to_string(),
        dob: NaiveDate::from_ymd_opt(1988, 10, 10).expect("valid date"),
        gender: Gender::Female,
    }
}
