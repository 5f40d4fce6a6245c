//! DTO validation.
//!
//! DTOs derive [`validator::Validate`]. [`validate`] turns the collected
//! violations into a single [`CoreError`]: the first violation (ordered by
//! field name) decides the error kind. Messages mentioning "empty" are
//! reported as a missing parameter, anything else as an invalid one.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Validate a DTO, mapping the first violation to `MissingParam` or `InvalidParam`.
pub fn validate<T: Validate>(dto: &T) -> Result<(), CoreError> {
    match dto.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(classify(first_violation(&errors))),
    }
}

/// Map a violation message to the error kind it represents.
fn classify(message: String) -> CoreError {
    if message.contains("empty") {
        CoreError::MissingParam(message)
    } else {
        CoreError::InvalidParam(message)
    }
}

/// Return the message of the first field violation, descending into nested structs.
fn first_violation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(err) = list.first() {
                    return err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                }
            }
            ValidationErrorsKind::Struct(nested) => return first_violation(nested),
            ValidationErrorsKind::List(items) => {
                if let Some(nested) = items.values().next() {
                    return first_violation(nested);
                }
            }
        }
    }

    "Request is invalid".to_string()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name should not be empty"))]
        name: String,
        #[validate(length(max = 5, message = "code must be at most 5 characters"))]
        code: String,
        #[validate(required(message = "owner_id should not be empty"))]
        owner_id: Option<i64>,
    }

    fn valid() -> Sample {
        Sample {
            name: "lexicon".into(),
            code: "abc".into(),
            owner_id: Some(1),
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn empty_message_maps_to_missing_param() {
        let dto = Sample {
            name: String::new(),
            ..valid()
        };
        assert_matches!(validate(&dto), Err(CoreError::MissingParam(msg)) if msg == "name should not be empty");
    }

    #[test]
    fn other_message_maps_to_invalid_param() {
        let dto = Sample {
            code: "too-long-code".into(),
            ..valid()
        };
        assert_matches!(validate(&dto), Err(CoreError::InvalidParam(msg)) if msg.contains("at most 5"));
    }

    #[test]
    fn first_violation_is_ordered_by_field_name() {
        // Both `code` and `name` fail; `code` sorts first.
        let dto = Sample {
            name: String::new(),
            code: "too-long-code".into(),
            owner_id: Some(1),
        };
        assert_matches!(validate(&dto), Err(CoreError::InvalidParam(_)));
    }

    #[test]
    fn absent_required_id_is_missing() {
        let dto = Sample {
            owner_id: None,
            ..valid()
        };
        assert_matches!(validate(&dto), Err(CoreError::MissingParam(_)));
    }
}
