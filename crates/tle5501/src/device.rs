//! Device core operations for the TLE5501 front end.

use crate::calibration::{CalibrationParameters, RotationExtrema};
use crate::channel::Channel;
use crate::config::Config;
use crate::data::RawSample;
use crate::error::Error;
use crate::interface::Interface;

pub(crate) struct DeviceCore<I> {
    interface: I,
    config: Config,
    extrema: RotationExtrema,
    params: CalibrationParameters,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            extrema: RotationExtrema::with_references(config.seed_45, config.seed_135),
            params: config.seed_parameters(),
        }
    }

    pub(crate) const fn config(&self) -> Config {
        self.config
    }

    pub(crate) fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Validates the configuration, probes all four channels once, and
    /// reseeds the calibration state.
    pub(crate) async fn init(&mut self) -> Result<(), Error> {
        self.config.validate()?;
        for channel in Channel::ALL {
            self.read_channel(channel)
                .await
                .map_err(|_| Error::NotPresent)?;
        }
        self.extrema = RotationExtrema::with_references(self.config.seed_45, self.config.seed_135);
        self.params = self.config.seed_parameters();
        Ok(())
    }

    pub(crate) async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error> {
        self.interface.read_channel(channel).await
    }

    /// Acquires one full bridge sample, one conversion per channel.
    pub(crate) async fn read_sample(&mut self) -> Result<RawSample, Error> {
        let sin_p = self.read_channel(Channel::SinP).await?;
        let sin_n = self.read_channel(Channel::SinN).await?;
        let cos_p = self.read_channel(Channel::CosP).await?;
        let cos_n = self.read_channel(Channel::CosN).await?;
        Ok(RawSample::new(sin_p, sin_n, cos_p, cos_n))
    }

    /// Feeds one sample into the calibration window.
    ///
    /// Returns the freshly computed parameters when enough valid rotations
    /// completed; the window then resets and accumulation starts over.
    pub(crate) fn update_calibration(&mut self, sample: RawSample) -> Option<CalibrationParameters> {
        self.extrema.observe(sample);
        if self.extrema.ready() {
            let params = CalibrationParameters::compute(&self.extrema);
            self.extrema.reset_window();
            self.params = params;
            return Some(params);
        }
        None
    }

    /// Reads one sample and feeds it into the calibration window.
    pub(crate) async fn track_calibration(&mut self) -> Result<Option<CalibrationParameters>, Error> {
        let sample = self.read_sample().await?;
        Ok(self.update_calibration(sample))
    }

    pub(crate) fn calibrated_angle(&self, sample: RawSample) -> f32 {
        self.params.angle_degrees(sample)
    }

    /// Reads one sample and converts it with the current parameters.
    pub(crate) async fn read_calibrated_angle(&mut self) -> Result<f32, Error> {
        let sample = self.read_sample().await?;
        Ok(self.calibrated_angle(sample))
    }

    pub(crate) const fn parameters(&self) -> CalibrationParameters {
        self.params
    }

    pub(crate) fn set_parameters(&mut self, params: CalibrationParameters) {
        self.params = params;
    }

    pub(crate) const fn extrema(&self) -> &RotationExtrema {
        &self.extrema
    }

    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    fn sample(dx: i16, dy: i16) -> RawSample {
        RawSample::new((2048 + dy) as u16, 2048, (2048 + dx) as u16, 2048)
    }

    // Differential pairs around one revolution at roughly 1000 LSB amplitude,
    // including the two reference crossings.
    const ROTATION: [(i16, i16); 6] = [
        (1000, 0),
        (707, 707),
        (0, 1000),
        (-707, 707),
        (-1000, 0),
        (0, -1000),
    ];

    fn core() -> DeviceCore<MockInterface> {
        DeviceCore::new(MockInterface::default(), Config::new())
    }

    #[test]
    fn read_sample_orders_channels() {
        let interface = MockInterface::default().with_sample(RawSample::new(927, 54, 932, 68));
        let mut core = DeviceCore::new(interface, Config::new());

        let sample = block_on(core.read_sample()).expect("sample");
        assert_eq!(sample, RawSample::new(927, 54, 932, 68));

        let interface = core.release();
        assert_eq!(interface.reads(), Channel::ALL);
    }

    #[test]
    fn init_probes_all_channels() {
        let mut core = core();
        block_on(core.init()).expect("init");
        let interface = core.release();
        assert_eq!(interface.reads().len(), 4);
    }

    #[test]
    fn init_reports_missing_front_end() {
        let mut core = DeviceCore::new(MockInterface::default().with_fault(), Config::new());
        assert_eq!(block_on(core.init()), Err(Error::NotPresent));
    }

    #[test]
    fn init_rejects_invalid_config() {
        let config = Config::new().with_seed_range(0);
        let mut core = DeviceCore::new(MockInterface::default(), config);
        assert_eq!(block_on(core.init()), Err(Error::InvalidData));
    }

    #[test]
    fn seeded_parameters_answer_before_any_rotation() {
        let core = core();
        let angle = core.calibrated_angle(RawSample::new(927, 54, 932, 68));
        assert!(angle.is_finite());
        assert!((angle - 45.0).abs() < 1.0);
    }

    #[test]
    fn recalibrates_after_two_valid_rotations() {
        let mut core = core();
        let mut recomputed = 0;

        for _ in 0..2 {
            for (dx, dy) in ROTATION {
                core.interface_mut().set_sample(sample(dx, dy));
                if block_on(core.track_calibration()).expect("track").is_some() {
                    recomputed += 1;
                }
            }
        }

        assert_eq!(recomputed, 1);
        let params = core.parameters();
        assert!((params.amplitude_x - 1000.0).abs() < 1.0);
        assert!((params.amplitude_y - 1000.0).abs() < 1.0);

        let angle = core.calibrated_angle(sample(707, 707));
        assert!((angle - 45.0).abs() < 0.5);
        let angle = core.calibrated_angle(sample(-707, 707));
        assert!((angle - 135.0).abs() < 0.5);
    }

    #[test]
    fn window_resets_after_recalibration() {
        let mut core = core();
        for _ in 0..2 {
            for (dx, dy) in ROTATION {
                core.update_calibration(sample(dx, dy));
            }
        }
        // The recomputation fired at the second 135 degree crossing; only the
        // two samples fed afterwards remain in the window.
        assert_eq!(core.extrema().valid_rotations(), 0);
        assert_eq!(core.extrema().range_x(), (-1000, 0));
        assert_eq!(core.extrema().range_y(), (-1000, 0));
    }
}
