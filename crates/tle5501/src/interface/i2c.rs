//! I2C interface adapter for an ADS7828 front end.

use embedded_hal_async::i2c::I2c;

use super::Ads7828Address;
use super::{Interface, sealed};
use crate::channel::{Channel, ads7828};
use crate::error::Error;

/// I2C interface configuration (address + reference selection).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    pub(crate) address: u8,
    pub(crate) internal_reference: bool,
}

impl I2cConfig {
    /// Creates a new I2C configuration for the provided address.
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            internal_reference: true,
        }
    }

    /// Sets the I2C address.
    #[must_use]
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Selects the internal 2.5 V reference instead of the REF pin.
    #[must_use]
    pub const fn with_internal_reference(mut self, enable: bool) -> Self {
        self.internal_reference = enable;
        self
    }
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::new(Ads7828Address::Strap00.addr())
    }
}

/// I2C conversion interface (ADS7828).
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
    internal_reference: bool,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new I2C interface with the given bus and configuration.
    pub const fn new(i2c: I2C, config: I2cConfig) -> Self {
        Self {
            i2c,
            address: config.address,
            internal_reference: config.internal_reference,
        }
    }

    /// Changes the 7-bit I2C address.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command_byte(&self, channel: Channel) -> u8 {
        let power = if self.internal_reference {
            ads7828::PD_REF_ON
        } else {
            ads7828::PD_REF_OFF
        };
        ads7828::SD_SINGLE | (ads7828::selector(channel.index()) << ads7828::CH_SHIFT) | power
    }
}

impl<I2C> Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error> {
        let command = [self.command_byte(channel)];
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &command, &mut buffer)
            .await
            .map_err(|_| Error::Bus)?;
        Ok(u16::from_be_bytes(buffer) & ads7828::DATA_MASK)
    }
}

impl<I2C> sealed::Sealed for I2cInterface<I2C> {}
