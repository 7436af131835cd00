//! Per-image 3D display settings.

use crate::{AnaglyphColors, ConvergenceMode, ConvergenceState, DisplayFormat};

/// How one stereo image should be displayed.
///
/// Authoring-time record stored alongside an image. Convert it into a
/// [`ConvergenceState`] once the image width is known; the stored
/// convergence values go through the same clamp and reject rules as live
/// updates.
///
/// # Example
///
/// ```
/// use stereoframe::{DisplayFormat, StereoSettings};
///
/// let state = StereoSettings::new()
///     .with_format(DisplayFormat::TopBottom)
///     .with_max_convergence(50)
///     .with_convergence(-60)
///     .into_state(1920);
/// assert_eq!(state.max_convergence(), 50);
/// assert_eq!(state.convergence(), -50);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct StereoSettings {
    /// How the image packs its two eyes, and whether to show one or both.
    pub format: DisplayFormat,
    /// Show the first stored eye to the right eye and vice versa.
    pub swap_left_right: bool,
    /// Requested convergence in texels. Clamped to `±max_convergence`.
    pub convergence: i32,
    /// Requested convergence bound in texels. Ignored if negative or above
    /// [`maximum_allowed_convergence`](crate::maximum_allowed_convergence).
    pub max_convergence: i32,
    /// How the cropped margin is handled.
    pub convergence_mode: ConvergenceMode,
    /// The texture is stored upside down.
    pub vertical_flip: bool,
    /// Glasses filters, for anaglyph formats.
    pub colors: AnaglyphColors,
}

impl Default for StereoSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl StereoSettings {
    /// Side-by-side, no swap, no convergence, red/cyan.
    pub const fn new() -> Self {
        Self {
            format: DisplayFormat::SideBySide,
            swap_left_right: false,
            convergence: 0,
            max_convergence: 0,
            convergence_mode: ConvergenceMode::Cropped,
            vertical_flip: false,
            colors: AnaglyphColors::RED_CYAN,
        }
    }

    /// Set the display format.
    pub const fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Swap which eye sees which half.
    pub const fn with_swap_left_right(mut self, swap: bool) -> Self {
        self.swap_left_right = swap;
        self
    }

    /// Set the requested convergence.
    pub const fn with_convergence(mut self, convergence: i32) -> Self {
        self.convergence = convergence;
        self
    }

    /// Set the requested convergence bound.
    pub const fn with_max_convergence(mut self, max: i32) -> Self {
        self.max_convergence = max;
        self
    }

    /// Set the convergence mode.
    pub const fn with_convergence_mode(mut self, mode: ConvergenceMode) -> Self {
        self.convergence_mode = mode;
        self
    }

    /// Mark the texture as stored upside down.
    pub const fn with_vertical_flip(mut self, flip: bool) -> Self {
        self.vertical_flip = flip;
        self
    }

    /// Set the anaglyph glasses filters.
    pub const fn with_colors(mut self, colors: AnaglyphColors) -> Self {
        self.colors = colors;
        self
    }

    /// Live convergence state for an image `image_width` pixels wide (0 if
    /// unknown).
    ///
    /// The maximum is applied before the convergence, so a rejected maximum
    /// leaves the state's maximum at 0 and convergence clamps to 0.
    pub fn into_state(self, image_width: u32) -> ConvergenceState {
        ConvergenceState::new(self.format, image_width)
            .with_mode(self.convergence_mode)
            .with_vertical_flip(self.vertical_flip)
            .with_swap_left_right(self.swap_left_right)
            .with_max_convergence(self.max_convergence)
            .with_convergence(self.convergence)
    }
}
