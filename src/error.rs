//! Error types for frame conversion and convergence updates.

use crate::StereoFormat;

/// Error from a conversion or a convergence update.
///
/// Carries the offending values so callers can report something useful.
/// Implements [`core::error::Error`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// The requested output would be empty, or two inputs that must share
    /// a dimension do not.
    InvalidDimensions {
        /// Width of the offending input.
        width: usize,
        /// Height of the offending input.
        height: usize,
    },
    /// No single conversion step connects the two formats.
    UnsupportedFormatTransition {
        /// Source format.
        from: StereoFormat,
        /// Target format.
        to: StereoFormat,
    },
    /// A `max_convergence` update exceeded the bound for the current image.
    ConvergenceOutOfRange {
        /// Requested value.
        requested: i32,
        /// Largest value accepted for the current format and width.
        max: i32,
    },
    /// An eye pair was supplied for a single-buffer format, or a single
    /// buffer for [`StereoFormat::TwoImages`].
    FrameShapeMismatch {
        /// Format the frame was declared as.
        format: StereoFormat,
    },
    /// Input dimensions exceed the configured [`ConversionLimits`](crate::ConversionLimits).
    Limit(LimitExceeded),
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions {width}x{height} for this conversion")
            }
            Self::UnsupportedFormatTransition { from, to } => {
                write!(f, "no conversion step from {from:?} to {to:?}")
            }
            Self::ConvergenceOutOfRange { requested, max } => {
                write!(f, "max convergence {requested} exceeds allowed {max}")
            }
            Self::FrameShapeMismatch { format } => {
                write!(f, "frame shape does not match format {format:?}")
            }
            Self::Limit(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Limit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LimitExceeded> for CodecError {
    fn from(e: LimitExceeded) -> Self {
        Self::Limit(e)
    }
}

/// A conversion limit that was exceeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitExceeded {
    /// Image width exceeded `max_width`.
    Width {
        /// Actual width.
        actual: u32,
        /// Maximum allowed.
        max: u32,
    },
    /// Image height exceeded `max_height`.
    Height {
        /// Actual height.
        actual: u32,
        /// Maximum allowed.
        max: u32,
    },
    /// Pixel count exceeded `max_pixels`.
    Pixels {
        /// Actual pixel count.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
}

impl core::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Width { actual, max } => {
                write!(f, "input width {actual} exceeds conversion limit {max}")
            }
            Self::Height { actual, max } => {
                write!(f, "input height {actual} exceeds conversion limit {max}")
            }
            Self::Pixels { actual, max } => {
                write!(f, "input has {actual} pixels, conversion limit is {max}")
            }
        }
    }
}

impl core::error::Error for LimitExceeded {}
