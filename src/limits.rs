//! Size limits for conversions.
//!
//! [`ConversionLimits`] caps the dimensions a conversion will accept.
//! [`convert`](crate::convert()) checks them before touching any pixels.

use crate::LimitExceeded;

/// Dimension limits for frame conversions.
///
/// All fields are optional; `None` means no limit for that dimension.
///
/// # Example
///
/// ```
/// use stereoframe::ConversionLimits;
///
/// let limits = ConversionLimits::none()
///     .with_max_width(7680)
///     .with_max_pixels(7680 * 4320);
/// assert!(limits.check_dimensions(3840, 1080).is_ok());
/// assert!(limits.check_dimensions(8000, 1080).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConversionLimits {
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum image width in pixels.
    pub max_width: Option<u32>,
    /// Maximum image height in pixels.
    pub max_height: Option<u32>,
}

impl ConversionLimits {
    /// No limits.
    pub const fn none() -> Self {
        Self {
            max_pixels: None,
            max_width: None,
            max_height: None,
        }
    }

    /// Set maximum total pixels.
    pub const fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    /// Set maximum image width in pixels.
    pub const fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set maximum image height in pixels.
    pub const fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Whether any limits are set.
    pub const fn has_any(&self) -> bool {
        self.max_pixels.is_some() || self.max_width.is_some() || self.max_height.is_some()
    }

    /// Reject a `width` × `height` input that is over any configured limit.
    ///
    /// Width is checked first, then height, then the pixel count.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return Err(LimitExceeded::Width { actual: width, max });
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return Err(LimitExceeded::Height {
                actual: height,
                max,
            });
        }
        let pixels = u64::from(width) * u64::from(height);
        match self.max_pixels {
            Some(max) if pixels > max => Err(LimitExceeded::Pixels {
                actual: pixels,
                max,
            }),
            _ => Ok(()),
        }
    }
}
