//! Error type for the TLE5501 driver.

/// Error type for TLE5501 operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus communication error (SPI or I2C transaction failed).
    Bus,
    /// ADC front end not responding during initial probing.
    NotPresent,
    /// Invalid configuration.
    InvalidData,
}
