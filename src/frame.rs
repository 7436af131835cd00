//! Stereo frame containers.
//!
//! [`StereoImage`] is one frame in some stereo layout, statically typed by
//! pixel. [`FrameData`] wraps the supported pixel types in one enum so a
//! caller can carry frames of different precision through one code path.

use alloc::vec::Vec;
use imgref::ImgVec;
use rgb::alt::BGRA;
use rgb::Rgba;

use crate::codec::{crop, Texel};
use crate::{convert, AnaglyphPixel, CodecError, ConvertOptions, Eye, StereoFormat};

/// One stereo frame: a single buffer, or two eye images.
#[derive(Clone, Debug, PartialEq)]
pub enum StereoImage<T> {
    /// Both eyes in one buffer.
    Single(ImgVec<T>),
    /// First and second eye images, in storage order. Which one is the
    /// left eye depends on the swap setting (see [`Eye::first`]).
    Pair(ImgVec<T>, ImgVec<T>),
}

impl<T> StereoImage<T> {
    /// Whether this holds two eye images.
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair(..))
    }

    /// Width and height of every buffer, in storage order.
    pub fn dimensions(&self) -> Vec<(usize, usize)> {
        match self {
            Self::Single(img) => alloc::vec![(img.width(), img.height())],
            Self::Pair(a, b) => alloc::vec![(a.width(), a.height()), (b.width(), b.height())],
        }
    }

    /// The single buffer, if this is not a pair.
    pub fn into_single(self) -> Option<ImgVec<T>> {
        match self {
            Self::Single(img) => Some(img),
            Self::Pair(..) => None,
        }
    }

    /// The two eye images, if this is a pair.
    pub fn into_pair(self) -> Option<(ImgVec<T>, ImgVec<T>)> {
        match self {
            Self::Single(_) => None,
            Self::Pair(a, b) => Some((a, b)),
        }
    }
}

impl<T> From<ImgVec<T>> for StereoImage<T> {
    fn from(img: ImgVec<T>) -> Self {
        Self::Single(img)
    }
}

/// Extract one eye's image from a frame stored as `format`.
///
/// Single-buffer formats are decoded to their canonical split and the eye's
/// half is cropped out: the left half of a side-by-side image, or the
/// visual top half (rows `H/2..H`) of a top/bottom image, belongs to
/// `Eye::first(swap_left_right)`.
pub fn extract_eye<P: AnaglyphPixel>(
    image: &StereoImage<P>,
    format: StereoFormat,
    eye: Eye,
    swap_left_right: bool,
    opts: &ConvertOptions,
) -> Result<ImgVec<P>, CodecError> {
    let is_first = eye == Eye::first(swap_left_right);
    let split = format.canonical_split();
    let decoded = match format {
        StereoFormat::TwoImages => {
            return match image {
                StereoImage::Pair(a, b) => Ok(if is_first { a.clone() } else { b.clone() }),
                StereoImage::Single(_) => Err(CodecError::FrameShapeMismatch { format }),
            };
        }
        _ if split == format => image.clone(),
        _ => convert(image.clone(), format, split, opts)?,
    };
    let Some(img) = decoded.into_single() else {
        return Err(CodecError::FrameShapeMismatch { format });
    };
    half_of(img, split, is_first)
}

fn half_of<T: Texel>(
    img: ImgVec<T>,
    split: StereoFormat,
    first: bool,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (img.width(), img.height());
    match split {
        StereoFormat::TopBottom => {
            let half = h / 2;
            let y = if first { half } else { 0 };
            crop(img.as_ref(), 0, y, w, half)
        }
        _ => {
            let half = w / 2;
            let x = if first { 0 } else { half };
            crop(img.as_ref(), x, 0, half, h)
        }
    }
}

/// A stereo frame whose pixel type is chosen at runtime.
///
/// Every variant supports the full conversion set, anaglyph included.
#[non_exhaustive]
pub enum FrameData {
    Rgba8(StereoImage<Rgba<u8>>),
    Rgba16(StereoImage<Rgba<u16>>),
    RgbaF32(StereoImage<Rgba<f32>>),
    /// 8-bit BGRA (blue, green, red, alpha byte order).
    Bgra8(StereoImage<BGRA<u8>>),
}

macro_rules! each_variant {
    ($self:expr, $img:ident => $body:expr) => {
        match $self {
            FrameData::Rgba8($img) => $body,
            FrameData::Rgba16($img) => $body,
            FrameData::RgbaF32($img) => $body,
            FrameData::Bgra8($img) => $body,
        }
    };
}

impl FrameData {
    /// Width of the first buffer in pixels.
    pub fn width(&self) -> u32 {
        each_variant!(self, img => first_dims(img).0 as u32)
    }

    /// Height of the first buffer in pixels.
    pub fn height(&self) -> u32 {
        each_variant!(self, img => first_dims(img).1 as u32)
    }

    /// Whether this holds two eye images.
    pub fn is_pair(&self) -> bool {
        each_variant!(self, img => img.is_pair())
    }

    /// Convert between stereo formats, keeping the pixel type.
    pub fn convert(
        self,
        from: StereoFormat,
        to: StereoFormat,
        opts: &ConvertOptions,
    ) -> Result<FrameData, CodecError> {
        Ok(match self {
            FrameData::Rgba8(img) => FrameData::Rgba8(convert(img, from, to, opts)?),
            FrameData::Rgba16(img) => FrameData::Rgba16(convert(img, from, to, opts)?),
            FrameData::RgbaF32(img) => FrameData::RgbaF32(convert(img, from, to, opts)?),
            FrameData::Bgra8(img) => FrameData::Bgra8(convert(img, from, to, opts)?),
        })
    }

    /// Convert every buffer to RGBA8, allocating new buffers.
    ///
    /// 16-bit channels are truncated to their high byte. Float channels are
    /// clamped to `0.0..=1.0` and scaled to 255.
    pub fn to_rgba8(&self) -> StereoImage<Rgba<u8>> {
        match self {
            FrameData::Rgba8(img) => img.clone(),
            FrameData::Rgba16(img) => map_pixels(img, |p| Rgba {
                r: (p.r >> 8) as u8,
                g: (p.g >> 8) as u8,
                b: (p.b >> 8) as u8,
                a: (p.a >> 8) as u8,
            }),
            FrameData::RgbaF32(img) => map_pixels(img, |p| Rgba {
                r: unit_to_u8(p.r),
                g: unit_to_u8(p.g),
                b: unit_to_u8(p.b),
                a: unit_to_u8(p.a),
            }),
            FrameData::Bgra8(img) => map_pixels(img, |p| Rgba {
                r: p.r,
                g: p.g,
                b: p.b,
                a: p.a,
            }),
        }
    }
}

fn first_dims<T>(img: &StereoImage<T>) -> (usize, usize) {
    match img {
        StereoImage::Single(i) | StereoImage::Pair(i, _) => (i.width(), i.height()),
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

fn map_pixels<T: Copy, U>(img: &StereoImage<T>, f: impl Fn(T) -> U) -> StereoImage<U> {
    let map = |i: &ImgVec<T>| {
        let (buf, w, h) = i.as_ref().to_contiguous_buf();
        ImgVec::new(buf.iter().map(|&p| f(p)).collect(), w, h)
    };
    match img {
        StereoImage::Single(i) => StereoImage::Single(map(i)),
        StereoImage::Pair(a, b) => StereoImage::Pair(map(a), map(b)),
    }
}

impl core::fmt::Debug for FrameData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FrameData::Rgba8(_) => "Rgba8",
            FrameData::Rgba16(_) => "Rgba16",
            FrameData::RgbaF32(_) => "RgbaF32",
            FrameData::Bgra8(_) => "Bgra8",
        };
        let shape = if self.is_pair() { " pair" } else { "" };
        write!(
            f,
            "FrameData::{name}({}x{}{shape})",
            self.width(),
            self.height()
        )
    }
}

impl From<StereoImage<Rgba<u8>>> for FrameData {
    fn from(img: StereoImage<Rgba<u8>>) -> Self {
        FrameData::Rgba8(img)
    }
}

impl From<StereoImage<Rgba<u16>>> for FrameData {
    fn from(img: StereoImage<Rgba<u16>>) -> Self {
        FrameData::Rgba16(img)
    }
}

impl From<StereoImage<Rgba<f32>>> for FrameData {
    fn from(img: StereoImage<Rgba<f32>>) -> Self {
        FrameData::RgbaF32(img)
    }
}

impl From<StereoImage<BGRA<u8>>> for FrameData {
    fn from(img: StereoImage<BGRA<u8>>) -> Self {
        FrameData::Bgra8(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    fn gray(v: u8) -> Rgba<u8> {
        Rgba {
            r: v,
            g: v,
            b: v,
            a: 255,
        }
    }

    #[test]
    fn extract_from_side_by_side() {
        let img = ImgVec::new(vec![gray(1), gray(2), gray(3), gray(4)], 4, 1);
        let frame = StereoImage::Single(img);
        let opts = ConvertOptions::new();
        let left = extract_eye(&frame, StereoFormat::SideBySide, Eye::Left, false, &opts).unwrap();
        assert_eq!(left.buf().as_slice(), &[gray(1), gray(2)]);
        let left = extract_eye(&frame, StereoFormat::SideBySide, Eye::Left, true, &opts).unwrap();
        assert_eq!(left.buf().as_slice(), &[gray(3), gray(4)]);
    }

    #[test]
    fn extract_from_top_bottom_uses_visual_top() {
        // Row 0 is the bottom row.
        let img = ImgVec::new(vec![gray(10), gray(20)], 1, 2);
        let frame = StereoImage::Single(img);
        let opts = ConvertOptions::new();
        let left = extract_eye(&frame, StereoFormat::TopBottom, Eye::Left, false, &opts).unwrap();
        assert_eq!(left.buf().as_slice(), &[gray(20)]);
        let right = extract_eye(&frame, StereoFormat::TopBottom, Eye::Right, false, &opts).unwrap();
        assert_eq!(right.buf().as_slice(), &[gray(10)]);
    }

    #[test]
    fn extract_from_interlaced() {
        // Odd columns fill the left half.
        let img = ImgVec::new(vec![gray(0), gray(1), gray(2), gray(3)], 4, 1);
        let frame = StereoImage::Single(img);
        let opts = ConvertOptions::new();
        let left =
            extract_eye(&frame, StereoFormat::VerticalInterlaced, Eye::Left, false, &opts).unwrap();
        assert_eq!(left.buf().as_slice(), &[gray(1), gray(3)]);
    }

    #[test]
    fn extract_from_pair() {
        let a = ImgVec::new(vec![gray(1)], 1, 1);
        let b = ImgVec::new(vec![gray(2)], 1, 1);
        let frame = StereoImage::Pair(a.clone(), b.clone());
        let opts = ConvertOptions::new();
        assert_eq!(
            extract_eye(&frame, StereoFormat::TwoImages, Eye::Right, false, &opts).unwrap(),
            b
        );
        assert_eq!(
            extract_eye(&frame, StereoFormat::TwoImages, Eye::Right, true, &opts).unwrap(),
            a
        );
        assert_eq!(
            extract_eye(
                &StereoImage::Single(a),
                StereoFormat::TwoImages,
                Eye::Left,
                false,
                &opts
            ),
            Err(CodecError::FrameShapeMismatch {
                format: StereoFormat::TwoImages
            })
        );
    }

    #[test]
    fn frame_data_convert_keeps_type() {
        let img = ImgVec::new(vec![Rgba::<u16>::default(); 8], 4, 2);
        let frame = FrameData::from(StereoImage::Single(img));
        let out = frame
            .convert(
                StereoFormat::SideBySide,
                StereoFormat::TopBottom,
                &ConvertOptions::new(),
            )
            .unwrap();
        assert!(matches!(out, FrameData::Rgba16(_)));
        assert_eq!((out.width(), out.height()), (2, 4));
    }

    #[test]
    fn frame_data_to_rgba8() {
        let px = Rgba {
            r: 0xff00u16,
            g: 0x1234,
            b: 0,
            a: 0xffff,
        };
        let frame = FrameData::Rgba16(StereoImage::Single(ImgVec::new(vec![px], 1, 1)));
        let out = frame.to_rgba8().into_single().unwrap();
        assert_eq!(
            out.buf()[0],
            Rgba {
                r: 0xff,
                g: 0x12,
                b: 0,
                a: 0xff
            }
        );

        let px = Rgba {
            r: 2.0f32,
            g: -1.0,
            b: 0.5,
            a: 1.0,
        };
        let frame = FrameData::RgbaF32(StereoImage::Single(ImgVec::new(vec![px], 1, 1)));
        let out = frame.to_rgba8().into_single().unwrap();
        assert_eq!(
            out.buf()[0],
            Rgba {
                r: 255,
                g: 0,
                b: 127,
                a: 255
            }
        );
    }

    #[test]
    fn frame_data_debug() {
        let img = ImgVec::new(vec![BGRA::<u8>::default(); 6], 3, 2);
        let frame = FrameData::from(StereoImage::Pair(img.clone(), img));
        assert_eq!(format!("{frame:?}"), "FrameData::Bgra8(3x2 pair)");
    }
}
