//! Errors surfaced by scheduling runs.

use std::fmt;

use crate::validation::{ValidationError, ValidationErrorKind};

/// Why a scheduling run refused to start.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Zero processes were supplied.
    EmptyProcessSet,
    /// One or more processes (or the quantum) failed validation.
    InvalidInput(Vec<ValidationError>),
}

impl ScheduleError {
    /// The individual validation failures, empty for `EmptyProcessSet`.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::EmptyProcessSet => &[],
            Self::InvalidInput(errors) => errors.as_slice(),
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        if errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyProcessSet)
        {
            Self::EmptyProcessSet
        } else {
            Self::InvalidInput(errors)
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProcessSet => f.write_str("no processes to schedule"),
            Self::InvalidInput(errors) => {
                f.write_str("invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::validation::{validate_processes, validate_quantum};

    #[test]
    fn test_empty_maps_to_empty_process_set() {
        let err: ScheduleError = validate_processes(&[]).unwrap_err().into();
        assert_eq!(err, ScheduleError::EmptyProcessSet);
        assert!(err.errors().is_empty());
    }

    #[test]
    fn test_invalid_input_display() {
        let err: ScheduleError = validate_quantum(0).unwrap_err().into();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "invalid input: Time quantum must be at least 1, got 0"
        );
    }

    #[test]
    fn test_invalid_input_keeps_all_errors() {
        let err: ScheduleError = validate_processes(&[Process::new(1, -1, 0)])
            .unwrap_err()
            .into();
        assert_eq!(err.errors().len(), 2);
        assert!(err.to_string().contains("; "));
    }
}
