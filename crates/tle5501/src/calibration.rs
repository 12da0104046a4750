//! Rotation calibration engine.
//!
//! While the magnet sweeps through full revolutions, [`RotationExtrema`]
//! tracks the differential min/max per axis and captures the raw vectors at
//! the 45 and 135 degree crossings. Once enough valid rotations complete,
//! [`CalibrationParameters::compute`] turns the window into per-axis
//! amplitude/offset corrections plus a single orthogonality angle that
//! compensates the sine and cosine bridges not being exactly 90 degrees out
//! of phase.

use libm::{atan2f, cosf, sinf, sqrtf};

use crate::data::RawSample;

/// Reference capture windows, in radians of uncalibrated angle.
pub mod window {
    /// Lower edge of the 45 degree capture window.
    pub const REF_45_MIN: f32 = 0.7806;
    /// Upper edge of the 45 degree capture window.
    pub const REF_45_MAX: f32 = 0.7894;
    /// Lower edge of the 135 degree capture window.
    pub const REF_135_MIN: f32 = 2.3506;
    /// Upper edge of the 135 degree capture window.
    pub const REF_135_MAX: f32 = 2.3594;
}

/// Degrees per radian as used by the vendor calibration routine
/// (slightly coarser than 180/pi).
const DEG_PER_RAD: f32 = 57.3248;

/// Largest differential swing a 12-bit front end can produce.
const DIFF_FULL_SCALE: i16 = 4095;

/// Completed passes required before parameters are recomputed.
const VALID_ROTATION_THRESHOLD: u8 = 1;

/// Differential (x, y) pair captured at a reference crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferencePoint {
    /// Differential cosine component at the crossing.
    pub x: i16,
    /// Differential sine component at the crossing.
    pub y: i16,
}

impl ReferencePoint {
    /// Creates a reference point from differential components.
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Running calibration window over one or more rotations.
///
/// Invariant: `min <= observed <= max` per axis for every sample fed in
/// since the last [`reset_window`](Self::reset_window).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationExtrema {
    min_x: i16,
    max_x: i16,
    min_y: i16,
    max_y: i16,
    ref_45: ReferencePoint,
    ref_135: ReferencePoint,
    found_45: bool,
    found_135: bool,
    valid_rotations: u8,
}

impl Default for RotationExtrema {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationExtrema {
    /// Creates an empty window with sentinel extrema.
    pub const fn new() -> Self {
        Self::with_references(ReferencePoint::new(0, 0), ReferencePoint::new(0, 0))
    }

    pub(crate) const fn with_references(ref_45: ReferencePoint, ref_135: ReferencePoint) -> Self {
        Self {
            min_x: DIFF_FULL_SCALE,
            max_x: -DIFF_FULL_SCALE,
            min_y: DIFF_FULL_SCALE,
            max_y: -DIFF_FULL_SCALE,
            ref_45,
            ref_135,
            found_45: false,
            found_135: false,
            valid_rotations: 0,
        }
    }

    pub(crate) const fn with_window(half_range: i16, ref_45: ReferencePoint, ref_135: ReferencePoint) -> Self {
        Self {
            min_x: -half_range,
            max_x: half_range,
            min_y: -half_range,
            max_y: half_range,
            ref_45,
            ref_135,
            found_45: false,
            found_135: false,
            valid_rotations: 0,
        }
    }

    /// Feeds one sample into the window.
    ///
    /// Updates the per-axis extrema, captures the reference vector when the
    /// uncalibrated angle falls inside a crossing window, and counts a valid
    /// rotation once both crossings have been seen.
    pub fn observe(&mut self, sample: RawSample) {
        let x = sample.diff_x();
        let y = sample.diff_y();

        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);

        let angle = sample.uncalibrated_angle();
        if (window::REF_45_MIN..=window::REF_45_MAX).contains(&angle) {
            self.ref_45 = ReferencePoint::new(x, y);
            self.found_45 = true;
        } else if (window::REF_135_MIN..=window::REF_135_MAX).contains(&angle) {
            self.ref_135 = ReferencePoint::new(x, y);
            self.found_135 = true;
        }

        if self.found_45 && self.found_135 {
            self.valid_rotations = self.valid_rotations.saturating_add(1);
            self.found_45 = false;
            self.found_135 = false;
        }
    }

    /// Returns whether enough valid rotations completed to recompute.
    pub const fn ready(&self) -> bool {
        self.valid_rotations > VALID_ROTATION_THRESHOLD
    }

    /// Clears the window back to sentinel extrema for the next pass.
    ///
    /// The last captured reference points are kept; they are overwritten on
    /// the next crossing before a recomputation can trigger again.
    pub fn reset_window(&mut self) {
        self.min_x = DIFF_FULL_SCALE;
        self.max_x = -DIFF_FULL_SCALE;
        self.min_y = DIFF_FULL_SCALE;
        self.max_y = -DIFF_FULL_SCALE;
        self.found_45 = false;
        self.found_135 = false;
        self.valid_rotations = 0;
    }

    /// Completed valid rotations since the last reset.
    pub const fn valid_rotations(&self) -> u8 {
        self.valid_rotations
    }

    /// Observed differential range on the cosine axis, as (min, max).
    pub const fn range_x(&self) -> (i16, i16) {
        (self.min_x, self.max_x)
    }

    /// Observed differential range on the sine axis, as (min, max).
    pub const fn range_y(&self) -> (i16, i16) {
        (self.min_y, self.max_y)
    }

    /// Last captured 45 degree reference vector.
    pub const fn reference_45(&self) -> ReferencePoint {
        self.ref_45
    }

    /// Last captured 135 degree reference vector.
    pub const fn reference_135(&self) -> ReferencePoint {
        self.ref_135
    }
}

/// Correction parameters derived from a completed calibration window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationParameters {
    /// Half of the observed cosine-axis swing.
    pub amplitude_x: f32,
    /// Half of the observed sine-axis swing.
    pub amplitude_y: f32,
    /// Mid-point of the observed cosine-axis swing.
    pub offset_x: f32,
    /// Mid-point of the observed sine-axis swing.
    pub offset_y: f32,
    /// Orthogonality error angle in radians.
    pub orthogonality: f32,
    /// Cached sin(-orthogonality).
    pub sin_ortho: f32,
    /// Cached cos(-orthogonality).
    pub cos_ortho: f32,
}

impl CalibrationParameters {
    /// Derives correction parameters from a calibration window.
    ///
    /// Pure function of the window contents: the same extrema always yield
    /// the same parameters. A window that never moved (zero swing on an
    /// axis) produces non-finite values here, and those propagate unguarded
    /// into every subsequent [`angle_degrees`](Self::angle_degrees) call.
    pub fn compute(extrema: &RotationExtrema) -> Self {
        let amplitude_x = (f32::from(extrema.max_x) - f32::from(extrema.min_x)) / 2.0;
        let amplitude_y = (f32::from(extrema.max_y) - f32::from(extrema.min_y)) / 2.0;
        let offset_x = (f32::from(extrema.max_x) + f32::from(extrema.min_x)) / 2.0;
        let offset_y = (f32::from(extrema.max_y) + f32::from(extrema.min_y)) / 2.0;

        let norm_45_x = (f32::from(extrema.ref_45.x) - offset_x) / amplitude_x;
        let norm_45_y = (f32::from(extrema.ref_45.y) - offset_y) / amplitude_y;
        let norm_135_x = (f32::from(extrema.ref_135.x) - offset_x) / amplitude_x;
        let norm_135_y = (f32::from(extrema.ref_135.y) - offset_y) / amplitude_y;

        let magnitude_45 = sqrtf(norm_45_x * norm_45_x + norm_45_y * norm_45_y);
        let magnitude_135 = sqrtf(norm_135_x * norm_135_x + norm_135_y * norm_135_y);

        let orthogonality =
            2.0 * atan2f(magnitude_135 - magnitude_45, magnitude_135 + magnitude_45);

        Self {
            amplitude_x,
            amplitude_y,
            offset_x,
            offset_y,
            orthogonality,
            sin_ortho: sinf(-orthogonality),
            cos_ortho: cosf(-orthogonality),
        }
    }

    /// Converts a raw sample into a corrected angle in degrees, in (-180, 180].
    ///
    /// Always returns a value; stale parameters or a degenerate window give
    /// a stale or NaN angle rather than an error.
    pub fn angle_degrees(&self, sample: RawSample) -> f32 {
        let corr_x = (f32::from(sample.diff_x()) - self.offset_x) / self.amplitude_x;
        let corr_y = (f32::from(sample.diff_y()) - self.offset_y) / self.amplitude_y;
        let ortho_y = (corr_y - corr_x * self.sin_ortho) / self.cos_ortho;
        atan2f(ortho_y, corr_x) * DEG_PER_RAD
    }

    /// Returns whether all parameters are finite.
    pub fn is_finite(&self) -> bool {
        self.amplitude_x.is_finite()
            && self.amplitude_y.is_finite()
            && self.offset_x.is_finite()
            && self.offset_y.is_finite()
            && self.orthogonality.is_finite()
            && self.sin_ortho.is_finite()
            && self.cos_ortho.is_finite()
    }
}
