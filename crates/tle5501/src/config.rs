//! Configuration for the TLE5501 driver.

use crate::calibration::{CalibrationParameters, ReferencePoint, RotationExtrema};
use crate::error::Error;

/// Seed calibration supplied at construction.
///
/// Until a full rotation has been observed and parameters recomputed, angle
/// queries fall back to corrections derived from these seeds, so the first
/// query never divides by zero. The defaults match the sensor's nominal
/// bridge output into a 12-bit front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Seed reference vector at the 45 degree crossing.
    pub seed_45: ReferencePoint,
    /// Seed reference vector at the 135 degree crossing.
    pub seed_135: ReferencePoint,
    /// Seed differential half-range applied to both axes.
    pub seed_range: i16,
}

impl Config {
    /// Nominal 45 degree reference vector.
    pub const DEFAULT_SEED_45: ReferencePoint = ReferencePoint::new(864, 873);
    /// Nominal 135 degree reference vector.
    pub const DEFAULT_SEED_135: ReferencePoint = ReferencePoint::new(-864, 873);
    /// Nominal differential half-range.
    pub const DEFAULT_SEED_RANGE: i16 = 1228;

    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            seed_45: Self::DEFAULT_SEED_45,
            seed_135: Self::DEFAULT_SEED_135,
            seed_range: Self::DEFAULT_SEED_RANGE,
        }
    }

    /// Sets the seed 45 degree reference vector.
    #[must_use]
    pub const fn with_seed_45(mut self, reference: ReferencePoint) -> Self {
        self.seed_45 = reference;
        self
    }

    /// Sets the seed 135 degree reference vector.
    #[must_use]
    pub const fn with_seed_135(mut self, reference: ReferencePoint) -> Self {
        self.seed_135 = reference;
        self
    }

    /// Sets the seed differential half-range.
    #[must_use]
    pub const fn with_seed_range(mut self, half_range: i16) -> Self {
        self.seed_range = half_range;
        self
    }

    pub(crate) fn validate(self) -> Result<(), Error> {
        if self.seed_range == 0 {
            return Err(Error::InvalidData);
        }
        Ok(())
    }

    pub(crate) fn seed_parameters(self) -> CalibrationParameters {
        let extrema = RotationExtrema::with_window(self.seed_range, self.seed_45, self.seed_135);
        CalibrationParameters::compute(&extrema)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
