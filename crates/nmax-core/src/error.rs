use std::fmt;

/// A formula received an argument outside its domain.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Logarithmic scale conversion needs s0 > 0.
    NonPositiveScale(f64),
    /// Convergence tolerance must be finite and > 0.
    InvalidTolerance(f64),
    InvalidParameter { name: &'static str, value: f64 },
    LengthMismatch { left: usize, right: usize },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NonPositiveScale(s0) => {
                write!(f, "scale must be positive, got {s0:e} (logarithm undefined)")
            }
            DomainError::InvalidTolerance(eps) => {
                write!(f, "tolerance must be finite and positive, got {eps:e}")
            }
            DomainError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
            DomainError::LengthMismatch { left, right } => {
                write!(f, "length mismatch: {left} values vs {right} coordinates")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_value() {
        let msg = DomainError::NonPositiveScale(-1.0).to_string();
        assert!(msg.contains("-1e0"), "got: {msg}");
        assert!(msg.contains("logarithm"));
    }

    #[test]
    fn test_display_parameter() {
        let msg = DomainError::InvalidParameter {
            name: "r0",
            value: 0.0,
        }
        .to_string();
        assert_eq!(msg, "invalid parameter r0 = 0");
    }
}
