//! Error type shared by the controller and configuration layer.
//!
//! Projection culling is not an error: it is reported as `None` by
//! `sky::projection::view_to_screen`.

use crate::sky::scene::AngleField;

/// Error raised by the sky core
#[derive(Debug, Clone, PartialEq)]
pub enum SkyError {
    /// A numeric control input could not be parsed as a finite angle
    InvalidParameter { field: AngleField, input: String },
    /// Configuration rejected by `SkyConfig::validate`
    InvalidConfig { reason: String },
}

impl std::fmt::Display for SkyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkyError::InvalidParameter { field, input } => {
                write!(f, "[{}] not a number: {:?}", field.label(), input)
            }
            SkyError::InvalidConfig { reason } => write!(f, "[config] {}", reason),
        }
    }
}

impl std::error::Error for SkyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_and_input() {
        let err = SkyError::InvalidParameter {
            field: AngleField::Latitude,
            input: "north".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Latitude"), "got {}", msg);
        assert!(msg.contains("north"), "got {}", msg);
    }
}
