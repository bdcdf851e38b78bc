use crate::types::{Coordinates, LocationError};

/// Source of the user's current position.
pub trait LocationSource: Send + Sync {
    fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Location taken from configuration. Unavailable when nothing is configured.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

impl LocationSource for ConfiguredLocation {
    fn locate(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::ServiceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_location_is_unavailable() {
        let source = ConfiguredLocation::default();
        assert!(matches!(source.locate(), Err(LocationError::ServiceUnavailable)));
    }

    #[test]
    fn test_configured_location() {
        let coords = Coordinates {
            latitude: 28.61,
            longitude: 77.21,
        };
        let source = ConfiguredLocation::new(Some(coords));
        assert!(matches!(source.locate(), Ok(c) if c == coords));
    }
}
