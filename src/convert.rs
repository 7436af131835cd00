//! Format-to-format conversion through the canonical split layouts.
//!
//! Only the single steps in [`Step`] are defined. Any other pair of formats
//! is reached by decoding to the source's canonical split, restacking or
//! splitting between side-by-side, top/bottom and eye pairs, and encoding
//! from the target's canonical split. [`plan`] computes that route and
//! [`convert()`] executes it.

use alloc::vec::Vec;

use crate::codec::{self, InterlaceConvention};
use crate::{
    AnaglyphColors, AnaglyphPixel, CodecError, ConversionLimits, StereoFormat, StereoImage,
};

/// Options shared by every step of a conversion.
///
/// # Example
///
/// ```
/// use stereoframe::{AnaglyphColors, ConvertOptions, ConversionLimits};
///
/// let opts = ConvertOptions::new()
///     .with_colors(AnaglyphColors::GREEN_MAGENTA)
///     .with_monochrome(true)
///     .with_limits(ConversionLimits::none().with_max_pixels(16_000_000));
/// assert!(opts.monochrome);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ConvertOptions {
    /// Glasses filters for anaglyph steps.
    pub colors: AnaglyphColors,
    /// Replace each eye's filtered pixels with their luma when separating
    /// an anaglyph.
    pub monochrome: bool,
    /// Row, column and checkerboard parity of the packed formats.
    pub convention: InterlaceConvention,
    /// Input size limits, checked before any pixel work.
    pub limits: ConversionLimits,
}

impl ConvertOptions {
    /// Red/cyan glasses, color output, default parity, no limits.
    pub const fn new() -> Self {
        Self {
            colors: AnaglyphColors::RED_CYAN,
            monochrome: false,
            convention: InterlaceConvention::DEFAULT,
            limits: ConversionLimits::none(),
        }
    }

    /// Set the anaglyph glasses filters.
    pub const fn with_colors(mut self, colors: AnaglyphColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set grayscale output for anaglyph separation.
    pub const fn with_monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = monochrome;
        self
    }

    /// Set the interlace parity convention.
    pub const fn with_convention(mut self, convention: InterlaceConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set input size limits.
    pub const fn with_limits(mut self, limits: ConversionLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// One defined conversion between two formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    HorizontalInterlacedToTopBottom,
    TopBottomToHorizontalInterlaced,
    VerticalInterlacedToSideBySide,
    SideBySideToVerticalInterlaced,
    CheckerboardToSideBySide,
    SideBySideToCheckerboard,
    AnaglyphToSideBySide,
    SideBySideToAnaglyph,
    /// Lossless restack, see [`codec::side_by_side_to_top_bottom`].
    SideBySideToTopBottom,
    /// Lossless restack, see [`codec::top_bottom_to_side_by_side`].
    TopBottomToSideBySide,
    /// Cut a side-by-side image into an eye pair.
    SplitSideBySide,
    /// Place an eye pair next to each other.
    JoinSideBySide,
}

impl Step {
    /// Every step, in declaration order.
    pub const ALL: [Step; 12] = [
        Self::HorizontalInterlacedToTopBottom,
        Self::TopBottomToHorizontalInterlaced,
        Self::VerticalInterlacedToSideBySide,
        Self::SideBySideToVerticalInterlaced,
        Self::CheckerboardToSideBySide,
        Self::SideBySideToCheckerboard,
        Self::AnaglyphToSideBySide,
        Self::SideBySideToAnaglyph,
        Self::SideBySideToTopBottom,
        Self::TopBottomToSideBySide,
        Self::SplitSideBySide,
        Self::JoinSideBySide,
    ];

    /// Format this step reads.
    pub const fn source(self) -> StereoFormat {
        use StereoFormat::*;
        match self {
            Self::HorizontalInterlacedToTopBottom => HorizontalInterlaced,
            Self::VerticalInterlacedToSideBySide => VerticalInterlaced,
            Self::CheckerboardToSideBySide => Checkerboard,
            Self::AnaglyphToSideBySide => Anaglyph,
            Self::TopBottomToHorizontalInterlaced | Self::TopBottomToSideBySide => TopBottom,
            Self::SideBySideToVerticalInterlaced
            | Self::SideBySideToCheckerboard
            | Self::SideBySideToAnaglyph
            | Self::SideBySideToTopBottom
            | Self::SplitSideBySide => SideBySide,
            Self::JoinSideBySide => TwoImages,
        }
    }

    /// Format this step produces.
    pub const fn target(self) -> StereoFormat {
        use StereoFormat::*;
        match self {
            Self::TopBottomToHorizontalInterlaced => HorizontalInterlaced,
            Self::SideBySideToVerticalInterlaced => VerticalInterlaced,
            Self::SideBySideToCheckerboard => Checkerboard,
            Self::SideBySideToAnaglyph => Anaglyph,
            Self::HorizontalInterlacedToTopBottom | Self::SideBySideToTopBottom => TopBottom,
            Self::VerticalInterlacedToSideBySide
            | Self::CheckerboardToSideBySide
            | Self::AnaglyphToSideBySide
            | Self::TopBottomToSideBySide
            | Self::JoinSideBySide => SideBySide,
            Self::SplitSideBySide => TwoImages,
        }
    }

    /// The step converting `from` directly into `to`.
    ///
    /// Fails with [`CodecError::UnsupportedFormatTransition`] when no single
    /// step connects them; use [`plan`] for arbitrary pairs.
    pub fn between(from: StereoFormat, to: StereoFormat) -> Result<Step, CodecError> {
        Self::ALL
            .into_iter()
            .find(|s| s.source() == from && s.target() == to)
            .ok_or(CodecError::UnsupportedFormatTransition { from, to })
    }

    /// Whether the step discards information that its reverse cannot
    /// restore.
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::AnaglyphToSideBySide | Self::SideBySideToAnaglyph)
    }

    /// Run this step on one image.
    pub fn apply<P: AnaglyphPixel>(
        self,
        image: StereoImage<P>,
        opts: &ConvertOptions,
    ) -> Result<StereoImage<P>, CodecError> {
        let conv = opts.convention;
        let single = match image {
            StereoImage::Pair(first, second) => {
                if self != Self::JoinSideBySide {
                    return Err(CodecError::FrameShapeMismatch {
                        format: self.source(),
                    });
                }
                return codec::join_side_by_side(first.as_ref(), second.as_ref())
                    .map(StereoImage::Single);
            }
            StereoImage::Single(img) => img,
        };
        let src = single.as_ref();
        let out = match self {
            Self::HorizontalInterlacedToTopBottom => {
                codec::horizontal_interlaced_to_top_bottom(src, conv)?
            }
            Self::TopBottomToHorizontalInterlaced => {
                codec::top_bottom_to_horizontal_interlaced(src, conv)?
            }
            Self::VerticalInterlacedToSideBySide => {
                codec::vertical_interlaced_to_side_by_side(src, conv)?
            }
            Self::SideBySideToVerticalInterlaced => {
                codec::side_by_side_to_vertical_interlaced(src, conv)?
            }
            Self::CheckerboardToSideBySide => codec::checkerboard_to_side_by_side(src, conv)?,
            Self::SideBySideToCheckerboard => codec::side_by_side_to_checkerboard(src, conv)?,
            Self::AnaglyphToSideBySide => {
                codec::anaglyph_to_side_by_side(src, opts.colors, opts.monochrome)?
            }
            Self::SideBySideToAnaglyph => codec::side_by_side_to_anaglyph(src, opts.colors)?,
            Self::SideBySideToTopBottom => codec::side_by_side_to_top_bottom(src)?,
            Self::TopBottomToSideBySide => codec::top_bottom_to_side_by_side(src)?,
            Self::SplitSideBySide => {
                let (first, second) = codec::split_side_by_side(src)?;
                return Ok(StereoImage::Pair(first, second));
            }
            Self::JoinSideBySide => {
                return Err(CodecError::FrameShapeMismatch {
                    format: StereoFormat::TwoImages,
                });
            }
        };
        Ok(StereoImage::Single(out))
    }
}

/// Ordered list of steps from one format to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionPlan {
    from: StereoFormat,
    to: StereoFormat,
    steps: Vec<Step>,
}

impl ConversionPlan {
    /// Source format.
    pub fn source(&self) -> StereoFormat {
        self.from
    }

    /// Target format.
    pub fn target(&self) -> StereoFormat {
        self.to
    }

    /// Steps in execution order. Empty when source and target match.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether the plan leaves the image untouched.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether any step is lossy.
    pub fn is_lossy(&self) -> bool {
        self.steps.iter().any(|s| s.is_lossy())
    }
}

/// Route from `from` to `to` through the canonical split layouts.
///
/// At most three steps: decode to the source's canonical split, move
/// between side-by-side, top/bottom and eye pairs, then encode.
pub fn plan(from: StereoFormat, to: StereoFormat) -> Result<ConversionPlan, CodecError> {
    use StereoFormat::*;

    let mut steps = Vec::new();
    let start = from.canonical_split();
    let end = to.canonical_split();
    if from != to {
        if from != start {
            steps.push(Step::between(from, start)?);
        }
        let mut path = Vec::with_capacity(3);
        path.push(start);
        if matches!((start, end), (TopBottom, TwoImages) | (TwoImages, TopBottom)) {
            path.push(SideBySide);
        }
        if end != start {
            path.push(end);
        }
        for hop in path.windows(2) {
            steps.push(Step::between(hop[0], hop[1])?);
        }
        if to != end {
            steps.push(Step::between(end, to)?);
        }
    }
    Ok(ConversionPlan { from, to, steps })
}

/// Convert `image`, stored as `from`, into `to`.
///
/// `image` must be a [`StereoImage::Pair`] exactly when `from` is
/// [`StereoFormat::TwoImages`]. Input dimensions are checked against
/// `opts.limits` first. Converting a format to itself returns the input.
pub fn convert<P: AnaglyphPixel>(
    image: StereoImage<P>,
    from: StereoFormat,
    to: StereoFormat,
    opts: &ConvertOptions,
) -> Result<StereoImage<P>, CodecError> {
    if image.is_pair() != (from == StereoFormat::TwoImages) {
        return Err(CodecError::FrameShapeMismatch { format: from });
    }
    for (w, h) in image.dimensions() {
        opts.limits.check_dimensions(to_u32(w), to_u32(h))?;
    }
    let plan = plan(from, to)?;
    log::debug!(
        "convert {:?} -> {:?}: {:?}",
        plan.source(),
        plan.target(),
        plan.steps()
    );
    plan.steps().iter().try_fold(image, |image, &step| {
        log::trace!("step {step:?}");
        step.apply(image, opts)
    })
}

fn to_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LimitExceeded;
    use imgref::ImgVec;
    use rgb::Rgba;

    use StereoFormat::*;

    fn px(v: u8) -> Rgba<u8> {
        Rgba {
            r: v,
            g: v,
            b: v,
            a: 255,
        }
    }

    fn numbered(w: usize, h: usize) -> ImgVec<Rgba<u8>> {
        let buf = (0..w * h).map(|i| px(i as u8)).collect();
        ImgVec::new(buf, w, h)
    }

    #[test]
    fn between_defined_steps() {
        for step in Step::ALL {
            assert_eq!(Step::between(step.source(), step.target()), Ok(step));
        }
        assert_eq!(
            Step::between(Checkerboard, TopBottom),
            Err(CodecError::UnsupportedFormatTransition {
                from: Checkerboard,
                to: TopBottom
            })
        );
    }

    #[test]
    fn plan_routes() {
        assert!(plan(Anaglyph, Anaglyph).unwrap().is_identity());
        assert_eq!(
            plan(HorizontalInterlaced, Checkerboard).unwrap().steps(),
            &[
                Step::HorizontalInterlacedToTopBottom,
                Step::TopBottomToSideBySide,
                Step::SideBySideToCheckerboard
            ]
        );
        assert_eq!(
            plan(TwoImages, HorizontalInterlaced).unwrap().steps(),
            &[
                Step::JoinSideBySide,
                Step::SideBySideToTopBottom,
                Step::TopBottomToHorizontalInterlaced
            ]
        );
        assert_eq!(
            plan(VerticalInterlaced, Checkerboard).unwrap().steps(),
            &[
                Step::VerticalInterlacedToSideBySide,
                Step::SideBySideToCheckerboard
            ]
        );
        assert_eq!(
            plan(TopBottom, TwoImages).unwrap().steps(),
            &[Step::TopBottomToSideBySide, Step::SplitSideBySide]
        );
        assert!(plan(Anaglyph, TopBottom).unwrap().is_lossy());
        assert!(!plan(Checkerboard, TopBottom).unwrap().is_lossy());
    }

    #[test]
    fn every_pair_has_a_plan() {
        for from in StereoFormat::ALL {
            for to in StereoFormat::ALL {
                let p = plan(from, to).unwrap();
                assert!(p.steps().len() <= 3, "{from:?} -> {to:?}");
                if let Some(first) = p.steps().first() {
                    assert_eq!(first.source(), from);
                }
                if let Some(last) = p.steps().last() {
                    assert_eq!(last.target(), to);
                }
                for pair in p.steps().windows(2) {
                    assert_eq!(pair[0].target(), pair[1].source());
                }
            }
        }
    }

    #[test]
    fn lossless_cross_family() {
        let img = numbered(4, 4);
        let opts = ConvertOptions::new();
        let hi = convert(
            StereoImage::Single(img.clone()),
            VerticalInterlaced,
            HorizontalInterlaced,
            &opts,
        )
        .unwrap();
        let back = convert(hi, HorizontalInterlaced, VerticalInterlaced, &opts).unwrap();
        assert_eq!(back, StereoImage::Single(img));
    }

    #[test]
    fn pair_roundtrip() {
        let img = numbered(4, 2);
        let opts = ConvertOptions::new();
        let pair = convert(StereoImage::Single(img.clone()), SideBySide, TwoImages, &opts).unwrap();
        assert!(pair.is_pair());
        let back = convert(pair, TwoImages, SideBySide, &opts).unwrap();
        assert_eq!(back, StereoImage::Single(img));
    }

    #[test]
    fn shape_mismatch() {
        let img = numbered(2, 2);
        let opts = ConvertOptions::new();
        assert_eq!(
            convert(StereoImage::Single(img.clone()), TwoImages, SideBySide, &opts),
            Err(CodecError::FrameShapeMismatch { format: TwoImages })
        );
        assert_eq!(
            convert(
                StereoImage::Pair(img.clone(), img),
                SideBySide,
                TopBottom,
                &opts
            ),
            Err(CodecError::FrameShapeMismatch { format: SideBySide })
        );
    }

    #[test]
    fn limits_checked_first() {
        let img = numbered(8, 2);
        let opts = ConvertOptions::new().with_limits(ConversionLimits::none().with_max_width(4));
        assert_eq!(
            convert(StereoImage::Single(img), SideBySide, TopBottom, &opts),
            Err(CodecError::Limit(LimitExceeded::Width { actual: 8, max: 4 }))
        );
    }

    #[test]
    fn zero_sized_step_fails() {
        let img = numbered(1, 2);
        assert_eq!(
            convert(
                StereoImage::Single(img),
                SideBySide,
                TopBottom,
                &ConvertOptions::new()
            ),
            Err(CodecError::InvalidDimensions {
                width: 1,
                height: 2
            })
        );
    }

    #[test]
    fn join_step_rejects_single() {
        let img = numbered(2, 2);
        assert_eq!(
            Step::JoinSideBySide.apply(StereoImage::Single(img), &ConvertOptions::new()),
            Err(CodecError::FrameShapeMismatch { format: TwoImages })
        );
    }
}
