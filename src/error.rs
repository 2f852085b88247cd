use thiserror::Error;

/// Errors raised by the insight core. Only out-of-domain values are errors;
/// unrecognized codes and empty collections degrade to neutral results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("invalid input for {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },
}
