//! Interface abstraction for ADC channel I/O.

pub(crate) mod address;
pub(crate) mod i2c;
pub(crate) mod spi;

pub use address::Ads7828Address;
pub use i2c::{I2cConfig, I2cInterface};
pub use spi::SpiInterface;

use crate::channel::Channel;
use crate::error::Error;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Minimal async conversion I/O for the ADC front end.
///
/// The bridge is sampled one channel per conversion; each call is a single
/// bus transaction with no retry on failure.
#[allow(async_fn_in_trait)]
pub trait Interface: sealed::Sealed {
    /// Runs one single-ended conversion and returns the 12-bit result.
    async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error>;
}
