//! Student controller.
//!
//! Translates between schema representations and JSON at the boundary of
//! the service calls. Generic over [`StudentApi`] so tests can inject a
//! canned service.

use serde_json::Value;
use uuid::Uuid;

use viper_boot_schema::Person;

use crate::error::ServiceError;
use crate::service::StudentApi;

/// The student CRUD surface, serialized at the boundary.
#[derive(Debug, Clone)]
pub struct StudentController<S> {
    service: S,
}

impl<S: StudentApi> StudentController<S> {
    /// Wrap a service.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Fetch one student as JSON.
    ///
    /// # Errors
    ///
    /// Propagates service failures unretried.
    pub async fn get(&self, id: Uuid) -> Result<Value, ServiceError> {
        let student = self.service.get(id).await?;
        Ok(serde_json::to_value(student)?)
    }

    /// Fetch all students as a JSON array.
    ///
    /// # Errors
    ///
    /// Propagates service failures unretried.
    pub async fn get_all(&self) -> Result<Value, ServiceError> {
        let students = self.service.get_all().await?;
        Ok(serde_json::to_value(students)?)
    }

    /// Create a student, returning the new identifier as JSON.
    ///
    /// # Errors
    ///
    /// Propagates service failures unretried.
    pub async fn post(&self, person: Person) -> Result<Value, ServiceError> {
        let id = self.service.post(person).await?;
        Ok(serde_json::to_value(id)?)
    }

    /// Update a student, returning the updated record as JSON.
    ///
    /// # Errors
    ///
    /// Propagates service failures unretried.
    pub async fn patch(&self, id: Uuid, person: Person) -> Result<Value, ServiceError> {
        let student = self.service.patch(id, person).await?;
        Ok(serde_json::to_value(student)?)
    }

    /// Remove a student, returning an empty JSON object.
    ///
    /// # Errors
    ///
    /// Propagates service failures unretried.
    pub async fn delete(&self, id: Uuid) -> Result<Value, ServiceError> {
        self.service.delete(id).await?;
        Ok(Value::Object(serde_json::Map::new()))
    }
}
