//! # Error reporting for problem descriptions
//!
//! Errors describing a linear program that is inconsistently represented by its source.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// An `InconsistencyError` is created when a linear program is inconsistently represented.
///
/// This `Error` is not returned when the linear program is infeasible or unbounded. It is meant
/// only for descriptions of linear programs, such as mismatching dimensions or duplicate variable
/// names, and should not be used after the construction of a `LinearProgram`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistencyError {
    description: String,
}

impl InconsistencyError {
    /// Wrap a text in an `InconsistencyError`.
    ///
    /// # Arguments
    ///
    /// * `description`: A human-readable text meant for the end user.
    pub fn new(description: impl Into<String>) -> InconsistencyError {
        InconsistencyError { description: description.into() }
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for InconsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InconsistencyError: {}", self.description)
    }
}

impl Error for InconsistencyError {}

#[cfg(test)]
mod test {
    use crate::io::error::InconsistencyError;

    #[test]
    fn display() {
        let error = InconsistencyError::new("Variable name \"X\" is not unique");

        assert_eq!(error.to_string(), "InconsistencyError: Variable name \"X\" is not unique");
        assert_eq!(error.description(), "Variable name \"X\" is not unique");
    }
}
