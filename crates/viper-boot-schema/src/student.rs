//! Student payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::{
    ApiSchema, FieldDescriptor, FieldKind, SchemaDescriptor, UnknownFields,
};
use crate::person::{Person, PERSON_DESCRIPTOR};

/// A student record as returned by the API.
///
/// The `id` is server-generated and read-only to clients. Parsing is
/// permissive: unknown incoming fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student id.
    pub id: Uuid,
    /// Student object.
    pub student: Person,
}

/// The identifier returned when a student is created.
///
/// Parsing is permissive: unknown incoming fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentId {
    /// Student id.
    pub id: Uuid,
}

/// Path/query parameters addressing a single student.
///
/// Unknown incoming fields are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentParams {
    /// Student id.
    pub id: Uuid,
}

/// Static field list for [`Student`].
pub static STUDENT_DESCRIPTOR: SchemaDescriptor = SchemaDescriptor {
    name: "Student",
    fields: &[
        FieldDescriptor::read_only("id", FieldKind::Uuid, "Student Id."),
        FieldDescriptor::optional(
            "student",
            FieldKind::Nested(&PERSON_DESCRIPTOR),
            "Student object.",
        ),
    ],
    unknown_fields: UnknownFields::Include,
};

/// Static field list for [`StudentId`].
pub static STUDENT_ID_DESCRIPTOR: SchemaDescriptor = SchemaDescriptor {
    name: "StudentId",
    fields: &[FieldDescriptor::read_only("id", FieldKind::Uuid, "Student Id.")],
    unknown_fields: UnknownFields::Include,
};

/// Static field list for [`StudentParams`].
pub static STUDENT_PARAMS_DESCRIPTOR: SchemaDescriptor = SchemaDescriptor {
    name: "StudentParams",
    fields: &[FieldDescriptor::required("id", FieldKind::Uuid, "Student Id.")],
    unknown_fields: UnknownFields::Reject,
};

impl ApiSchema for Student {
    fn descriptor() -> &'static SchemaDescriptor {
        &STUDENT_DESCRIPTOR
    }
}

impl ApiSchema for StudentId {
    fn descriptor() -> &'static SchemaDescriptor {
        &STUDENT_ID_DESCRIPTOR
    }
}

impl ApiSchema for StudentParams {
    fn descriptor() -> &'static SchemaDescriptor {
        &STUDENT_PARAMS_DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gender::Gender;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample(gender: Gender) -> Student {
        Student {
            id: Uuid::new_v4(),
            student: Person {
                first_name: "James".to_string(),
                last_name: "Smith".to_string(),
                dob: NaiveDate::from_ymd_opt(1978, 10, 10).unwrap(),
                gender,
            },
        }
    }

    #[test]
    fn test_student_round_trip_both_genders() {
        for gender in Gender::ALL {
            let student = sample(gender);
            let json = serde_json::to_string(&student).unwrap();
            let back: Student = serde_json::from_str(&json).unwrap();
            assert_eq!(back, student);
        }
    }

    #[test]
    fn test_student_unknown_fields_ignored() {
        let value = json!({
            "id": Uuid::new_v4(),
            "student": {
                "first_name": "James",
                "last_name": "Smith",
                "dob": "1978-10-10",
                "gender": "MALE",
            },
            "campus": "north",
        });
        let student: Student = serde_json::from_value(value).unwrap();
        assert_eq!(student.student.first_name, "James");
    }

    #[test]
    fn test_student_id_unknown_fields_ignored() {
        let value = json!({ "id": Uuid::new_v4(), "extra": true });
        assert!(serde_json::from_value::<StudentId>(value).is_ok());
    }

    #[test]
    fn test_student_params_unknown_fields_rejected() {
        let value = json!({ "id": Uuid::new_v4(), "extra": true });
        assert!(serde_json::from_value::<StudentParams>(value).is_err());
    }

    #[test]
    fn test_student_params_requires_id() {
        assert!(serde_json::from_value::<StudentParams>(json!({})).is_err());
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(Student::descriptor().name, "Student");
        assert_eq!(StudentId::descriptor().name, "StudentId");
        assert_eq!(StudentParams::descriptor().name, "StudentParams");

        assert_eq!(
            Student::descriptor().unknown_fields,
            UnknownFields::Include
        );
        assert_eq!(
            StudentParams::descriptor().unknown_fields,
            UnknownFields::Reject
        );

        // Student nests Person through its descriptor.
        match Student::descriptor().field("student").unwrap().kind {
            FieldKind::Nested(nested) => assert_eq!(nested.name, "Person"),
            _ => panic!("expected nested person"),
        }
    }
}
