//! Person payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::descriptor::{
    ApiSchema, FieldDescriptor, FieldKind, SchemaDescriptor, UnknownFields,
};
use crate::gender::Gender;

/// A person record: the client-supplied part of a student.
///
/// All fields are required and unknown incoming fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Gender.
    pub gender: Gender,
}

/// Static field list for [`Person`].
pub static PERSON_DESCRIPTOR: SchemaDescriptor = SchemaDescriptor {
    name: "Person",
    fields: &[
        FieldDescriptor::required("first_name", FieldKind::Str, "First name"),
        FieldDescriptor::required("last_name", FieldKind::Str, "Last name"),
        FieldDescriptor::required("dob", FieldKind::Date, "Date of birth")
            .with_default("Today date"),
        FieldDescriptor::required("gender", FieldKind::Str, "Gender")
            .with_enum(&["MALE", "FEMALE"]),
    ],
    unknown_fields: UnknownFields::Reject,
};

impl ApiSchema for Person {
    fn descriptor() -> &'static SchemaDescriptor {
        &PERSON_DESCRIPTOR
    }
}
