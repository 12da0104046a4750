//! Async `#![no_std]` driver for the
//! [TLE5501](https://www.infineon.com/cms/en/product/sensor/magnetic-sensors/magnetic-position-sensors/angle-sensors/tle5501-e0001/)
//! analog TMR angle sensor from Infineon, sampled through a 4-channel 12-bit
//! ADC front end (MCP3204 on SPI or ADS7828 on I2C).
//!
//! The sensor bridge outputs differential sine and cosine components of the
//! magnetic field angle. This crate acquires the four bridge channels,
//! tracks their extrema while the magnet rotates, captures reference vectors
//! at the 45 and 135 degree crossings, and derives amplitude, offset, and
//! orthogonality corrections that turn a raw sample into a calibrated angle
//! in degrees.
//!
//! # Quick start (I2C)
//!
//! ```rust,no_run
//! use tle5501::{Ads7828Address, Config, I2cConfig, Tle5501I2c};
//! # use embedded_hal_async::i2c::I2c;
//! #
//! # async fn example<I2C: I2c>(i2c: I2C) -> Result<(), tle5501::Error> {
//! let config = Config::new();
//! let i2c_config = I2cConfig::new(Ads7828Address::Strap00.addr());
//! let mut sensor: Tle5501I2c<I2C> = Tle5501I2c::with_i2c_config(i2c, config, i2c_config);
//! sensor.init().await?;
//!
//! // Rotate the magnet through full revolutions while polling.
//! while sensor.track_calibration().await?.is_none() {}
//!
//! let angle = sensor.read_calibrated_angle().await?;
//! # let _ = angle;
//! # Ok(())
//! # }
//! ```
//!
//! For an MCP3204 front end, construct with [`Tle5501::new_spi`] instead;
//! the rest of the API is identical.
//!
//! # Calibration
//!
//! Before the first completed rotation, angle queries use corrections
//! derived from the seed values in [`Config`], so they are coarse but never
//! divide by zero. [`track_calibration`](Tle5501::track_calibration) (or
//! [`update_calibration`](Tle5501::update_calibration) with self-acquired
//! samples) refreshes the parameters every time enough valid rotations
//! complete, indefinitely. Parameters can be saved and restored across
//! sessions via [`Tle5501::parameters`] and [`Tle5501::set_parameters`].
//!
//! A calibration pass over a magnet that never moved produces non-finite
//! parameters; see [`CalibrationParameters::compute`].
//!
//! # defmt
//!
//! Enable the `defmt` feature to derive `defmt::Format` on the public data
//! types.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::module_name_repetitions
)]

mod calibration;
mod channel;
mod config;
mod data;
mod device;
mod driver;
mod error;
mod interface;

#[cfg(test)]
mod testing;

// Interface layer
pub use channel::Channel;
pub use interface::Ads7828Address;
pub use interface::SpiInterface;
pub use interface::{I2cConfig, I2cInterface};

// Configuration
pub use config::Config;

// Driver
pub use driver::{Tle5501, Tle5501I2c, Tle5501Spi};

// Data types
pub use calibration::{CalibrationParameters, ReferencePoint, RotationExtrema};
pub use data::RawSample;

// Features
pub use error::Error;
