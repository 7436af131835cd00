//! Stereoscopic 3D layouts.
//!
//! [`StereoFormat`] names how two eye images are packed into pixel data.
//! [`DisplayFormat`] adds what a viewer can do with them: show a plain 2D
//! image, or show one eye's image to both eyes (the `Mono*` variants).

/// How the two eye images are packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StereoFormat {
    /// Eyes placed next to each other, left half then right half.
    SideBySide,
    /// Eyes stacked vertically.
    TopBottom,
    /// Eyes stored as two separate images.
    TwoImages,
    /// Eyes interleaved one pixel row at a time.
    HorizontalInterlaced,
    /// Eyes interleaved one pixel column at a time.
    VerticalInterlaced,
    /// Eyes interleaved pixel by pixel in a checkerboard pattern.
    Checkerboard,
    /// Eyes overlaid in one image using disjoint color channels.
    Anaglyph,
}

/// The axis a format splits its eye images along, once decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    /// Eye images share the width (side-by-side family).
    Horizontal,
    /// Eye images share the height (top/bottom family).
    Vertical,
    /// Not split: 2D, or two separate images.
    None,
}

impl StereoFormat {
    /// All formats, in declaration order.
    pub const ALL: [StereoFormat; 7] = [
        Self::SideBySide,
        Self::TopBottom,
        Self::TwoImages,
        Self::HorizontalInterlaced,
        Self::VerticalInterlaced,
        Self::Checkerboard,
        Self::Anaglyph,
    ];

    /// Axis of the canonical split this format decodes to.
    ///
    /// Horizontal interlacing decodes to top/bottom; vertical interlacing,
    /// checkerboard and anaglyph decode to side-by-side.
    pub const fn split_axis(self) -> SplitAxis {
        match self {
            Self::SideBySide | Self::VerticalInterlaced | Self::Checkerboard | Self::Anaglyph => {
                SplitAxis::Horizontal
            }
            Self::TopBottom | Self::HorizontalInterlaced => SplitAxis::Vertical,
            Self::TwoImages => SplitAxis::None,
        }
    }

    /// The split format this format decodes to without loss of layout.
    pub const fn canonical_split(self) -> StereoFormat {
        match self.split_axis() {
            SplitAxis::Horizontal => Self::SideBySide,
            SplitAxis::Vertical => Self::TopBottom,
            SplitAxis::None => Self::TwoImages,
        }
    }

    /// Whether eye images occupy contiguous halves of one buffer.
    pub const fn is_split(self) -> bool {
        matches!(self, Self::SideBySide | Self::TopBottom)
    }

    /// Whether eye pixels are interleaved at single row, column, or pixel
    /// granularity.
    pub const fn is_packed(self) -> bool {
        matches!(
            self,
            Self::HorizontalInterlaced | Self::VerticalInterlaced | Self::Checkerboard
        )
    }

    /// Whether the format stores both eyes in a single buffer.
    pub const fn is_single_buffer(self) -> bool {
        !matches!(self, Self::TwoImages)
    }

    /// Parse a short or long format name (case-insensitive).
    ///
    /// Accepts names like `"sbs"`, `"side-by-side"`, `"tb"`, `"over-under"`,
    /// `"hi"`, `"vi"`, `"checkerboard"`, `"anaglyph"`, `"pair"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut buf = [0u8; 24];
        let bytes = name.as_bytes();
        if bytes.len() > buf.len() {
            return None;
        }
        for (i, &b) in bytes.iter().enumerate() {
            buf[i] = match b.to_ascii_lowercase() {
                b'_' | b' ' => b'-',
                other => other,
            };
        }
        match &buf[..bytes.len()] {
            b"sbs" | b"side-by-side" | b"sidebyside" | b"lr" => Some(Self::SideBySide),
            b"tb" | b"tab" | b"top-bottom" | b"topbottom" | b"over-under" | b"ou" => {
                Some(Self::TopBottom)
            }
            b"two-images" | b"twoimages" | b"pair" => Some(Self::TwoImages),
            b"hi" | b"horizontal-interlaced" | b"row-interlaced" => {
                Some(Self::HorizontalInterlaced)
            }
            b"vi" | b"vertical-interlaced" | b"column-interlaced" => {
                Some(Self::VerticalInterlaced)
            }
            b"cb" | b"checkerboard" => Some(Self::Checkerboard),
            b"anaglyph" | b"ana" => Some(Self::Anaglyph),
            _ => None,
        }
    }

    /// Canonical short name.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::SideBySide => "sbs",
            Self::TopBottom => "tb",
            Self::TwoImages => "pair",
            Self::HorizontalInterlaced => "hi",
            Self::VerticalInterlaced => "vi",
            Self::Checkerboard => "cb",
            Self::Anaglyph => "anaglyph",
        }
    }
}

/// One of the two eyes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// The other eye.
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The eye stored in the left half, the visual top half, or the first
    /// image of a pair, given the swap setting.
    pub const fn first(swap_left_right: bool) -> Self {
        if swap_left_right {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Display formats for a stereo viewer.
///
/// Every stereo layout appears twice: once showing each eye its own image,
/// and once as a `Mono*` variant that reuses the first eye's image for
/// both eyes while keeping the source packing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayFormat {
    /// Plain image, no stereo decoding.
    TwoD,
    #[default]
    SideBySide,
    TopBottom,
    TwoImages,
    HorizontalInterlaced,
    VerticalInterlaced,
    Checkerboard,
    Anaglyph,
    MonoSideBySide,
    MonoTopBottom,
    MonoTwoImages,
    MonoHorizontalInterlaced,
    MonoVerticalInterlaced,
    MonoCheckerboard,
    MonoAnaglyph,
}

impl DisplayFormat {
    /// The packing of the source data, or `None` for [`TwoD`](Self::TwoD).
    pub const fn stereo_format(self) -> Option<StereoFormat> {
        match self {
            Self::TwoD => None,
            Self::SideBySide | Self::MonoSideBySide => Some(StereoFormat::SideBySide),
            Self::TopBottom | Self::MonoTopBottom => Some(StereoFormat::TopBottom),
            Self::TwoImages | Self::MonoTwoImages => Some(StereoFormat::TwoImages),
            Self::HorizontalInterlaced | Self::MonoHorizontalInterlaced => {
                Some(StereoFormat::HorizontalInterlaced)
            }
            Self::VerticalInterlaced | Self::MonoVerticalInterlaced => {
                Some(StereoFormat::VerticalInterlaced)
            }
            Self::Checkerboard | Self::MonoCheckerboard => Some(StereoFormat::Checkerboard),
            Self::Anaglyph | Self::MonoAnaglyph => Some(StereoFormat::Anaglyph),
        }
    }

    /// Stereo display of the given packing.
    pub const fn stereo(format: StereoFormat) -> Self {
        match format {
            StereoFormat::SideBySide => Self::SideBySide,
            StereoFormat::TopBottom => Self::TopBottom,
            StereoFormat::TwoImages => Self::TwoImages,
            StereoFormat::HorizontalInterlaced => Self::HorizontalInterlaced,
            StereoFormat::VerticalInterlaced => Self::VerticalInterlaced,
            StereoFormat::Checkerboard => Self::Checkerboard,
            StereoFormat::Anaglyph => Self::Anaglyph,
        }
    }

    /// Mono display of the given packing.
    pub const fn mono(format: StereoFormat) -> Self {
        match format {
            StereoFormat::SideBySide => Self::MonoSideBySide,
            StereoFormat::TopBottom => Self::MonoTopBottom,
            StereoFormat::TwoImages => Self::MonoTwoImages,
            StereoFormat::HorizontalInterlaced => Self::MonoHorizontalInterlaced,
            StereoFormat::VerticalInterlaced => Self::MonoVerticalInterlaced,
            StereoFormat::Checkerboard => Self::MonoCheckerboard,
            StereoFormat::Anaglyph => Self::MonoAnaglyph,
        }
    }

    /// Whether both eyes are shown the same image.
    pub const fn is_mono(self) -> bool {
        matches!(
            self,
            Self::MonoSideBySide
                | Self::MonoTopBottom
                | Self::MonoTwoImages
                | Self::MonoHorizontalInterlaced
                | Self::MonoVerticalInterlaced
                | Self::MonoCheckerboard
                | Self::MonoAnaglyph
        )
    }

    /// Split axis of the decoded source; [`SplitAxis::None`] for 2D.
    pub const fn split_axis(self) -> SplitAxis {
        match self.stereo_format() {
            Some(format) => format.split_axis(),
            None => SplitAxis::None,
        }
    }
}

impl From<StereoFormat> for DisplayFormat {
    fn from(format: StereoFormat) -> Self {
        Self::stereo(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_families() {
        use StereoFormat::*;
        for f in [SideBySide, VerticalInterlaced, Checkerboard, Anaglyph] {
            assert_eq!(f.split_axis(), SplitAxis::Horizontal, "{f:?}");
            assert_eq!(f.canonical_split(), SideBySide);
        }
        for f in [TopBottom, HorizontalInterlaced] {
            assert_eq!(f.split_axis(), SplitAxis::Vertical, "{f:?}");
            assert_eq!(f.canonical_split(), TopBottom);
        }
        assert_eq!(TwoImages.split_axis(), SplitAxis::None);
        assert!(!TwoImages.is_single_buffer());
    }

    #[test]
    fn packed_and_split() {
        assert!(StereoFormat::SideBySide.is_split());
        assert!(StereoFormat::TopBottom.is_split());
        assert!(!StereoFormat::Anaglyph.is_split());
        assert!(StereoFormat::Checkerboard.is_packed());
        assert!(!StereoFormat::Anaglyph.is_packed());
    }

    #[test]
    fn names_roundtrip() {
        for f in StereoFormat::ALL {
            assert_eq!(StereoFormat::from_name(f.short_name()), Some(f));
        }
    }

    #[test]
    fn name_aliases() {
        assert_eq!(
            StereoFormat::from_name("Side_By_Side"),
            Some(StereoFormat::SideBySide)
        );
        assert_eq!(
            StereoFormat::from_name("Over Under"),
            Some(StereoFormat::TopBottom)
        );
        assert_eq!(
            StereoFormat::from_name("HORIZONTAL-INTERLACED"),
            Some(StereoFormat::HorizontalInterlaced)
        );
        assert_eq!(StereoFormat::from_name("mpo"), None);
        assert_eq!(
            StereoFormat::from_name("a-name-that-is-far-too-long-to-match"),
            None
        );
    }

    #[test]
    fn display_mono_variants() {
        for f in StereoFormat::ALL {
            let stereo = DisplayFormat::stereo(f);
            let mono = DisplayFormat::mono(f);
            assert!(!stereo.is_mono());
            assert!(mono.is_mono());
            assert_eq!(stereo.stereo_format(), Some(f));
            assert_eq!(mono.stereo_format(), Some(f));
            assert_eq!(mono.split_axis(), f.split_axis());
        }
        assert_eq!(DisplayFormat::TwoD.stereo_format(), None);
        assert_eq!(DisplayFormat::TwoD.split_axis(), SplitAxis::None);
        assert_eq!(DisplayFormat::default(), DisplayFormat::SideBySide);
    }

    #[test]
    fn eye_order() {
        assert_eq!(Eye::first(false), Eye::Left);
        assert_eq!(Eye::first(true), Eye::Right);
        assert_eq!(Eye::Left.other(), Eye::Right);
    }
}
