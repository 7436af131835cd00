//! Convergence: per-eye texture scale and offset for a split stereo image.
//!
//! Each eye shows one half of the decoded image. Shifting the two halves
//! horizontally in opposite directions moves the perceived focal plane.
//! The shift is measured in texels and bounded by `max_convergence`; the
//! outermost `max_convergence` texels of each eye are cropped so the
//! shifted view never samples past the edge of its half.
//!
//! Nothing here touches pixels. The results are `(scale, offset)` pairs a
//! renderer applies to its texture sampling.

use glam::Vec2;

use crate::{CodecError, DisplayFormat, SplitAxis};

/// How convergence headroom is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConvergenceMode {
    /// Crop `max_convergence` texels from each side of every eye.
    #[default]
    Cropped,
    /// Same scale and offset as `Cropped`; the renderer is expected to wrap
    /// texture coordinates instead of clamping them.
    Tiled,
}

/// Upper bound for `max_convergence` given the display format and the
/// width of the whole image.
///
/// An eighth of the width for side-by-side family formats, a quarter for
/// everything else. `None` when the width is unknown (zero); any
/// non-negative maximum is then accepted.
///
/// ```
/// use stereoframe::{maximum_allowed_convergence, DisplayFormat};
///
/// assert_eq!(maximum_allowed_convergence(DisplayFormat::SideBySide, 800), Some(100));
/// assert_eq!(maximum_allowed_convergence(DisplayFormat::TopBottom, 800), Some(200));
/// assert_eq!(maximum_allowed_convergence(DisplayFormat::TopBottom, 0), None);
/// ```
pub fn maximum_allowed_convergence(format: DisplayFormat, image_width: u32) -> Option<i32> {
    if image_width == 0 {
        return None;
    }
    let width = i32::try_from(image_width).unwrap_or(i32::MAX);
    Some(match format.split_axis() {
        SplitAxis::Horizontal => width / 8,
        SplitAxis::Vertical | SplitAxis::None => width / 4,
    })
}

/// Texture scale of the left and right eye.
///
/// The visible width shrinks by `2 * |max_convergence|` texels. Side-by-side
/// family formats then halve the horizontal scale, top/bottom family
/// formats the vertical one. `vertical_flip` negates the vertical scale.
/// Both eyes always share one scale.
pub fn tile_scale(
    format: DisplayFormat,
    texel_x: f32,
    default_scale: Vec2,
    max_convergence: i32,
    vertical_flip: bool,
) -> (Vec2, Vec2) {
    let visible = 1.0 - 2.0 * max_convergence.unsigned_abs() as f32 * texel_x;
    let mut scale = Vec2::new(default_scale.x * visible, default_scale.y);
    match format.split_axis() {
        SplitAxis::Horizontal => scale.x /= 2.0,
        SplitAxis::Vertical => scale.y /= 2.0,
        SplitAxis::None => {}
    }
    if vertical_flip {
        scale.y = -scale.y;
    }
    (scale, scale)
}

/// Texture offset of the left and right eye.
///
/// Both eyes start at `default_offset`, so a material that already pans its
/// texture keeps that pan in both eyes. The eye that reads the second half
/// then moves by half the default scale along the split axis: the right
/// eye by `default_scale.x / 2` for side-by-side family formats, the left
/// eye by `default_scale.y / 2` for top/bottom family formats (buffers are
/// bottom-up, so the left eye's top half starts at `y = 0.5`).
/// `swap_left_right` moves the other eye instead.
///
/// Convergence then shifts the eyes apart horizontally: the left eye by
/// `+convergence` texels and the right eye by `-convergence`, both by
/// `+max_convergence` to skip the cropped margin. Side-by-side family
/// formats halve both shifts. Mono formats give the right eye the left
/// eye's offset.
pub fn tile_offset(
    format: DisplayFormat,
    convergence: i32,
    max_convergence: i32,
    texel_x: f32,
    default_scale: Vec2,
    default_offset: Vec2,
    swap_left_right: bool,
) -> (Vec2, Vec2) {
    let mut shift = convergence as f32 * texel_x;
    let mut margin = max_convergence as f32 * texel_x;
    let mut left = default_offset;
    let mut right = default_offset;

    match format.split_axis() {
        SplitAxis::Horizontal => {
            let half = default_scale.x / 2.0;
            if swap_left_right {
                left.x += half;
            } else {
                right.x += half;
            }
            shift /= 2.0;
            margin /= 2.0;
        }
        SplitAxis::Vertical => {
            let half = default_scale.y / 2.0;
            if swap_left_right {
                right.y += half;
            } else {
                left.y += half;
            }
        }
        SplitAxis::None => {}
    }

    left.x += shift + margin;
    right.x += margin - shift;
    if format.is_mono() {
        right = left;
    }
    (left, right)
}

/// Scale and offset applied to one eye's texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeTransform {
    /// Texture coordinate scale.
    pub scale: Vec2,
    /// Texture coordinate offset, applied after scaling.
    pub offset: Vec2,
}

impl EyeTransform {
    /// Unit scale, zero offset.
    pub const IDENTITY: Self = Self {
        scale: Vec2::ONE,
        offset: Vec2::ZERO,
    };

    /// Transform from a scale and an offset.
    pub const fn new(scale: Vec2, offset: Vec2) -> Self {
        Self { scale, offset }
    }
}

impl Default for EyeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Convergence settings of the image being displayed.
///
/// Setters take and return the state by value.
///
/// - `|convergence| <= max_convergence` holds after every call.
/// - Convergence updates are clamped into range.
/// - Max-convergence updates above [`maximum_allowed_convergence`], or
///   below zero, are rejected and leave the state unchanged.
///
/// ```
/// use stereoframe::{ConvergenceState, DisplayFormat};
///
/// let state = ConvergenceState::new(DisplayFormat::SideBySide, 800)
///     .with_max_convergence(40)
///     .with_convergence(-90);
/// assert_eq!(state.convergence(), -40);
///
/// // 101 is above 800 / 8, so it is ignored.
/// let state = state.with_max_convergence(101);
/// assert_eq!(state.max_convergence(), 40);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvergenceState {
    format: DisplayFormat,
    image_width: u32,
    convergence: i32,
    max_convergence: i32,
    mode: ConvergenceMode,
    vertical_flip: bool,
    swap_left_right: bool,
}

impl ConvergenceState {
    /// Zero convergence for an image of `image_width` pixels (0 if unknown).
    pub const fn new(format: DisplayFormat, image_width: u32) -> Self {
        Self {
            format,
            image_width,
            convergence: 0,
            max_convergence: 0,
            mode: ConvergenceMode::Cropped,
            vertical_flip: false,
            swap_left_right: false,
        }
    }

    /// Display format the bounds are computed for.
    pub const fn format(&self) -> DisplayFormat {
        self.format
    }

    /// Source image width in pixels, 0 if unknown.
    pub const fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Current convergence in texels. Always within `±max_convergence`.
    pub const fn convergence(&self) -> i32 {
        self.convergence
    }

    /// Current convergence bound in texels. Never negative.
    pub const fn max_convergence(&self) -> i32 {
        self.max_convergence
    }

    /// How the cropped margin is handled.
    pub const fn mode(&self) -> ConvergenceMode {
        self.mode
    }

    /// Whether the vertical scale is negated.
    pub const fn vertical_flip(&self) -> bool {
        self.vertical_flip
    }

    /// Whether each eye reads the other eye's half.
    pub const fn swap_left_right(&self) -> bool {
        self.swap_left_right
    }

    /// Bound for `max_convergence` at the current format and width.
    pub fn allowed_max(&self) -> Option<i32> {
        maximum_allowed_convergence(self.format, self.image_width)
    }

    /// Set convergence, clamped to `±max_convergence`.
    pub fn with_convergence(mut self, value: i32) -> Self {
        self.convergence = value.clamp(-self.max_convergence, self.max_convergence);
        self
    }

    /// Set the convergence bound.
    ///
    /// Fails with [`CodecError::ConvergenceOutOfRange`] if `value` is
    /// negative or above [`allowed_max`](Self::allowed_max). Lowering the
    /// bound below `|convergence|` pulls convergence in, keeping its sign.
    pub fn try_with_max_convergence(mut self, value: i32) -> Result<Self, CodecError> {
        let allowed = self.allowed_max();
        if value < 0 || allowed.is_some_and(|m| value > m) {
            return Err(CodecError::ConvergenceOutOfRange {
                requested: value,
                max: allowed.unwrap_or(i32::MAX),
            });
        }
        self.max_convergence = value;
        self.convergence = self.convergence.clamp(-value, value);
        Ok(self)
    }

    /// Like [`try_with_max_convergence`](Self::try_with_max_convergence),
    /// but a rejected value leaves the state unchanged.
    pub fn with_max_convergence(self, value: i32) -> Self {
        match self.try_with_max_convergence(value) {
            Ok(state) => state,
            Err(e) => {
                log::debug!("ignoring max convergence update: {e}");
                self
            }
        }
    }

    /// Change the display format. Lowers `max_convergence` (and clamps
    /// convergence) if the new bound is smaller.
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self.revalidate()
    }

    /// Change the image width. Lowers `max_convergence` (and clamps
    /// convergence) if the new bound is smaller.
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self.revalidate()
    }

    /// Set the convergence mode. Does not change the bounds.
    pub const fn with_mode(mut self, mode: ConvergenceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Flip both eyes vertically.
    pub const fn with_vertical_flip(mut self, vertical_flip: bool) -> Self {
        self.vertical_flip = vertical_flip;
        self
    }

    /// Show the left half to the right eye and the other way round.
    pub const fn with_swap_left_right(mut self, swap_left_right: bool) -> Self {
        self.swap_left_right = swap_left_right;
        self
    }

    fn revalidate(mut self) -> Self {
        if let Some(bound) = self.allowed_max()
            && self.max_convergence > bound
        {
            log::debug!(
                "max convergence {} above new bound {bound}, lowering",
                self.max_convergence
            );
            self.max_convergence = bound;
            self.convergence = self.convergence.clamp(-bound, bound);
        }
        self
    }

    /// Width of one texel in texture coordinates, or 0 for an unknown width.
    pub fn texel_x(&self) -> f32 {
        if self.image_width == 0 {
            0.0
        } else {
            1.0 / self.image_width as f32
        }
    }

    /// Left and right eye transforms, starting from the surface's
    /// untouched scale and offset.
    pub fn eye_transforms(&self, defaults: EyeTransform) -> (EyeTransform, EyeTransform) {
        let texel_x = self.texel_x();
        let (left_scale, right_scale) = tile_scale(
            self.format,
            texel_x,
            defaults.scale,
            self.max_convergence,
            self.vertical_flip,
        );
        let (left_offset, right_offset) = tile_offset(
            self.format,
            self.convergence,
            self.max_convergence,
            texel_x,
            defaults.scale,
            defaults.offset,
            self.swap_left_right,
        );
        (
            EyeTransform::new(left_scale, left_offset),
            EyeTransform::new(right_scale, right_offset),
        )
    }
}
