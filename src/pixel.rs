//! Per-channel pixel access for anaglyph filtering.
//!
//! The row/column remapping transforms only move whole pixels, so they work
//! on any `Copy` pixel. Anaglyph conversion has to zero and pick individual
//! color channels; [`AnaglyphPixel`] exposes that for the `rgb`
//! crate's four-channel types.

use rgb::alt::BGRA;
use rgb::{Rgb, Rgba};

use crate::Eye;

/// A four-channel pixel whose color channels can be handled individually.
///
/// Implemented for `Rgba<u8>`, `Rgba<u16>`, `Rgba<f32>` and `BGRA<u8>`.
/// Channels are always exchanged in R, G, B order regardless of storage
/// order.
pub trait AnaglyphPixel: Copy + Default + Send + Sync + 'static {
    /// Storage type of one channel.
    type Channel: Copy + Default + PartialEq;

    /// Fully opaque alpha value.
    const OPAQUE: Self::Channel;

    /// Color channels in R, G, B order.
    fn color_channels(self) -> [Self::Channel; 3];

    /// Alpha channel.
    fn alpha_channel(self) -> Self::Channel;

    /// Build a pixel from R, G, B channels and alpha.
    fn from_rgb_alpha(rgb: [Self::Channel; 3], alpha: Self::Channel) -> Self;

    /// Rec.601 luma (`0.299 R + 0.587 G + 0.114 B`) of the color channels.
    fn luma(rgb: [Self::Channel; 3]) -> Self::Channel;

    /// Zero every color channel the filter does not pass. Alpha is kept.
    fn filtered(self, filter: Rgb<f32>) -> Self {
        let zero = Self::Channel::default();
        let [r, g, b] = self.color_channels();
        Self::from_rgb_alpha(
            [
                if filter.r > 0.0 { r } else { zero },
                if filter.g > 0.0 { g } else { zero },
                if filter.b > 0.0 { b } else { zero },
            ],
            self.alpha_channel(),
        )
    }

    /// Luma replicated across R, G and B. Alpha is kept.
    fn grayscale(self) -> Self {
        let y = Self::luma(self.color_channels());
        Self::from_rgb_alpha([y, y, y], self.alpha_channel())
    }
}

macro_rules! impl_anaglyph_int {
    ($pixel:ty, $channel:ty, $opaque:expr) => {
        impl AnaglyphPixel for $pixel {
            type Channel = $channel;
            const OPAQUE: $channel = $opaque;

            #[inline]
            fn color_channels(self) -> [$channel; 3] {
                [self.r, self.g, self.b]
            }

            #[inline]
            fn alpha_channel(self) -> $channel {
                self.a
            }

            #[inline]
            fn from_rgb_alpha([r, g, b]: [$channel; 3], a: $channel) -> Self {
                Self { r, g, b, a }
            }

            #[inline]
            fn luma([r, g, b]: [$channel; 3]) -> $channel {
                let sum = 299 * r as u64 + 587 * g as u64 + 114 * b as u64;
                ((sum + 500) / 1000) as $channel
            }
        }
    };
}

impl_anaglyph_int!(Rgba<u8>, u8, u8::MAX);
impl_anaglyph_int!(Rgba<u16>, u16, u16::MAX);
impl_anaglyph_int!(BGRA<u8>, u8, u8::MAX);

impl AnaglyphPixel for Rgba<f32> {
    type Channel = f32;
    const OPAQUE: f32 = 1.0;

    #[inline]
    fn color_channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    fn alpha_channel(self) -> f32 {
        self.a
    }

    #[inline]
    fn from_rgb_alpha([r, g, b]: [f32; 3], a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    fn luma([r, g, b]: [f32; 3]) -> f32 {
        0.299 * r + 0.587 * g + 0.114 * b
    }
}

/// The color filters of a pair of anaglyph glasses.
///
/// A channel survives for an eye when that eye's filter component is
/// greater than zero. When packing two eyes into one anaglyph, each channel
/// comes from the eye whose filter weights it more; a tie yields zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnaglyphColors {
    /// Filter in front of the left eye.
    pub left: Rgb<f32>,
    /// Filter in front of the right eye.
    pub right: Rgb<f32>,
}

impl Default for AnaglyphColors {
    fn default() -> Self {
        Self::RED_CYAN
    }
}

impl AnaglyphColors {
    /// Red left, cyan right.
    pub const RED_CYAN: Self = Self::new(
        Rgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        },
        Rgb {
            r: 0.0,
            g: 1.0,
            b: 1.0,
        },
    );

    /// Green left, magenta right.
    pub const GREEN_MAGENTA: Self = Self::new(
        Rgb {
            r: 0.0,
            g: 1.0,
            b: 0.0,
        },
        Rgb {
            r: 1.0,
            g: 0.0,
            b: 1.0,
        },
    );

    /// Amber left, blue right.
    pub const AMBER_BLUE: Self = Self::new(
        Rgb {
            r: 1.0,
            g: 0.75,
            b: 0.0,
        },
        Rgb {
            r: 0.0,
            g: 0.0,
            b: 1.0,
        },
    );

    /// Filter pair from left and right colors.
    pub const fn new(left: Rgb<f32>, right: Rgb<f32>) -> Self {
        Self { left, right }
    }

    /// Filter for one eye.
    pub const fn filter(&self, eye: Eye) -> Rgb<f32> {
        match eye {
            Eye::Left => self.left,
            Eye::Right => self.right,
        }
    }

    /// For each of R, G, B: the eye that contributes that channel to a
    /// combined anaglyph, or `None` on a tie.
    pub fn channel_sources(&self) -> [Option<Eye>; 3] {
        let pick = |l: f32, r: f32| {
            if l > r {
                Some(Eye::Left)
            } else if r > l {
                Some(Eye::Right)
            } else {
                None
            }
        };
        [
            pick(self.left.r, self.right.r),
            pick(self.left.g, self.right.g),
            pick(self.left.b, self.right.b),
        ]
    }

    /// Combine a left and right pixel into one anaglyph pixel with opaque
    /// alpha.
    #[inline]
    pub fn combine<P: AnaglyphPixel>(&self, left: P, right: P) -> P {
        combine_with(self.channel_sources(), left, right)
    }
}

/// [`AnaglyphColors::combine`] with the channel sources already resolved.
#[inline]
pub(crate) fn combine_with<P: AnaglyphPixel>(
    sources: [Option<Eye>; 3],
    left: P,
    right: P,
) -> P {
    let l = left.color_channels();
    let r = right.color_channels();
    let mut out = [P::Channel::default(); 3];
    for (i, source) in sources.iter().enumerate() {
        out[i] = match source {
            Some(Eye::Left) => l[i],
            Some(Eye::Right) => r[i],
            None => P::Channel::default(),
        };
    }
    P::from_rgb_alpha(out, P::OPAQUE)
}
