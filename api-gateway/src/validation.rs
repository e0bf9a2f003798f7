//! Request validation on top of `validator` derives.
//!
//! Request types mark required fields with `code = "required"`; any other
//! failing rule is reported as an invalid field.

use shared::Error;
use validator::{Validate, ValidationErrors};

/// Code used by request types for "must be present and non-zero".
pub const REQUIRED: &str = "required";

/// Validate a decoded request, turning field failures into a single message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), Error> {
    request
        .validate()
        .map_err(|errors| Error::Validation(describe(&errors)))
}

/// `field a is a required field, field b is not valid`, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, bool)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let required = errs.iter().any(|e| e.code == REQUIRED);
            (field.to_string(), required)
        })
        .collect();
    fields.sort();

    fields
        .iter()
        .map(|(field, required)| {
            if *required {
                format!("field {field} is a required field")
            } else {
                format!("field {field} is not valid")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
