//! TLE5501 driver implementation.
//!
//! This module provides the public facade over the device core.

use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use crate::calibration::{CalibrationParameters, RotationExtrema};
use crate::channel::Channel;
use crate::config::Config;
use crate::data::RawSample;
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::Interface;
use crate::interface::{I2cConfig, I2cInterface};
use crate::interface::SpiInterface;

/// TLE5501 TMR angle sensor driver.
pub struct Tle5501<I> {
    core: DeviceCore<I>,
}

/// SPI type alias for the TLE5501 driver (MCP3204 front end).
pub type Tle5501Spi<SPI> = Tle5501<SpiInterface<SPI>>;
/// I2C type alias for the TLE5501 driver (ADS7828 front end).
pub type Tle5501I2c<I2C> = Tle5501<I2cInterface<I2C>>;

impl<SPI> Tle5501<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Creates a new SPI-based driver with default settings.
    pub fn new_spi(spi: SPI) -> Self {
        Self::with_spi_config(spi, Config::new())
    }

    /// Creates a new SPI-based driver with a custom configuration.
    pub fn with_spi_config(spi: SPI, config: Config) -> Self {
        let interface = SpiInterface::new(spi);
        let core = DeviceCore::new(interface, config);
        Self { core }
    }

    /// Releases the SPI bus, consuming the driver.
    pub fn release(self) -> SPI {
        self.core.release().release()
    }
}

impl<I2C> Tle5501<I2cInterface<I2C>>
where
    I2C: I2c,
{
    /// Creates a new I2C-based driver with default settings.
    pub fn new_i2c(i2c: I2C) -> Self {
        Self::with_i2c_config(i2c, Config::new(), I2cConfig::default())
    }

    /// Creates a new I2C-based driver with a custom configuration.
    pub fn with_i2c_config(i2c: I2C, config: Config, i2c_config: I2cConfig) -> Self {
        let interface = I2cInterface::new(i2c, i2c_config);
        let core = DeviceCore::new(interface, config);
        Self { core }
    }

    /// Updates the I2C address used by the interface.
    pub fn set_i2c_address(&mut self, address: u8) {
        self.core.interface_mut().set_address(address);
    }

    /// Releases the I2C bus, consuming the driver.
    pub fn release(self) -> I2C {
        self.core.release().release()
    }
}

impl<I> Tle5501<I>
where
    I: Interface,
{
    /// Returns the current configuration.
    pub const fn config(&self) -> Config {
        self.core.config()
    }

    /// Updates the configuration; takes effect on the next [`init`](Self::init).
    pub fn set_config(&mut self, config: Config) {
        self.core.set_config(config);
    }

    /// Initializes the driver: validates the configuration, probes all four
    /// channels once, and seeds the calibration state.
    pub async fn init(&mut self) -> Result<(), Error> {
        self.core.init().await
    }

    /// Runs one single-ended conversion on the given channel.
    pub async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error> {
        self.core.read_channel(channel).await
    }

    /// Acquires one full bridge sample (four conversions).
    pub async fn read_sample(&mut self) -> Result<RawSample, Error> {
        self.core.read_sample().await
    }

    /// Feeds an already-acquired sample into the calibration window.
    ///
    /// Returns the freshly computed parameters once enough valid rotations
    /// completed; the window then resets and accumulation starts over.
    pub fn update_calibration(&mut self, sample: RawSample) -> Option<CalibrationParameters> {
        self.core.update_calibration(sample)
    }

    /// Reads one sample and feeds it into the calibration window.
    ///
    /// Poll this while the magnet rotates; the calibration refresh loop has
    /// no terminal state and simply stops when the caller stops polling.
    pub async fn track_calibration(&mut self) -> Result<Option<CalibrationParameters>, Error> {
        self.core.track_calibration().await
    }

    /// Converts a raw sample with the current parameters, in degrees.
    pub fn calibrated_angle(&self, sample: RawSample) -> f32 {
        self.core.calibrated_angle(sample)
    }

    /// Reads one sample and converts it with the current parameters.
    pub async fn read_calibrated_angle(&mut self) -> Result<f32, Error> {
        self.core.read_calibrated_angle().await
    }

    /// Returns the correction parameters currently in use.
    pub const fn parameters(&self) -> CalibrationParameters {
        self.core.parameters()
    }

    /// Replaces the correction parameters (for example, restored from
    /// non-volatile storage).
    pub fn set_parameters(&mut self, params: CalibrationParameters) {
        self.core.set_parameters(params);
    }

    /// Returns the current calibration window.
    pub const fn extrema(&self) -> &RotationExtrema {
        self.core.extrema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    fn driver() -> Tle5501<MockInterface> {
        let interface = MockInterface::default().with_sample(RawSample::new(927, 54, 932, 68));
        let core = DeviceCore::new(interface, Config::new());
        Tle5501 { core }
    }

    #[test]
    fn init_then_read_angle_with_seeded_parameters() {
        let mut driver = driver();
        block_on(driver.init()).expect("init");

        let angle = block_on(driver.read_calibrated_angle()).expect("angle");
        assert!(angle.is_finite());
        assert!((angle - 45.0).abs() < 1.0);

        // One probe pass plus one sample acquisition.
        let interface = driver.core.release();
        assert_eq!(interface.reads().len(), 8);
    }

    #[test]
    fn init_surfaces_missing_front_end() {
        let core = DeviceCore::new(MockInterface::default().with_fault(), Config::new());
        let mut driver = Tle5501 { core };
        assert_eq!(block_on(driver.init()), Err(Error::NotPresent));
    }

    #[test]
    fn track_calibration_reports_no_update_without_rotation() {
        let mut driver = driver();
        let update = block_on(driver.track_calibration()).expect("track");
        assert!(update.is_none());
    }
}
