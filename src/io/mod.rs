//! # Reading of linear programs
//!
//! Parsing of file formats such as MPS happens outside of this crate. A reader only needs to be
//! able to produce a consistent `LinearProgram`, which is what the `ProblemSource` trait describes.
use crate::data::linear_program::general_form::LinearProgram;
use crate::io::error::InconsistencyError;

pub mod error;

/// All types implementing this trait can be converted into a `LinearProgram`.
///
/// Implementations are expected to produce unique variable names and consistent dimensions; both
/// are checked again by `LinearProgram::new`.
pub trait ProblemSource {
    /// Create the linear program described by this source.
    ///
    /// # Errors
    ///
    /// When the description is logically inconsistent, for example because a bound is given for a
    /// variable that is not known.
    fn to_linear_program(&self) -> Result<LinearProgram, InconsistencyError>;
}

impl ProblemSource for LinearProgram {
    fn to_linear_program(&self) -> Result<LinearProgram, InconsistencyError> {
        Ok(self.clone())
    }
}
