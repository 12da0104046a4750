//! SPI interface adapter for an MCP3204 front end.

use embedded_hal_async::spi::SpiDevice;

use super::{Interface, sealed};
use crate::channel::{Channel, mcp3204};
use crate::error::Error;

/// SPI conversion interface (MCP3204).
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new SPI interface with the given bus.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

/// Builds the 3-byte command frame for a single-ended conversion.
const fn command_frame(channel: Channel) -> [u8; 3] {
    let input = channel.index();
    let first = mcp3204::START | mcp3204::SINGLE_ENDED | ((input >> 2) & mcp3204::CH_D2);
    let second = (input & 0b11) << mcp3204::CH_LOW_SHIFT;
    [first, second, 0x00]
}

/// Extracts the 12-bit conversion result from the response frame.
///
/// The result straddles the last two bytes, most significant nibble first,
/// preceded by a null bit the mask strips.
const fn decode_frame(frame: [u8; 3]) -> u16 {
    (((frame[1] as u16) << 8) | frame[2] as u16) & mcp3204::DATA_MASK
}

impl<SPI> Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error> {
        let tx = command_frame(channel);
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &tx)
            .await
            .map_err(|_| Error::Bus)?;
        Ok(decode_frame(rx))
    }
}

impl<SPI> sealed::Sealed for SpiInterface<SPI> {}
