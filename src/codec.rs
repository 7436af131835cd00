//! Pixel remapping between stereo layouts.
//!
//! Every transform reads one immutable source image and returns a newly
//! allocated image. Output rows are computed independently of each other,
//! so the `rayon` feature can split work by row without changing results.
//!
//! Buffers are bottom-up: row 0 is the bottom row of the image. In a
//! top/bottom image the visual top eye occupies rows `H/2..H`.
//!
//! Odd dimensions are floor-divided. Output pixels with no source pixel
//! are left at `T::default()`. An output that would have zero width or
//! height is a [`CodecError::InvalidDimensions`] error.

use alloc::vec;
use imgref::{ImgRef, ImgVec};

use crate::pixel::combine_with;
use crate::{AnaglyphColors, AnaglyphPixel, CodecError, Eye};

/// Any pixel type the remapping transforms can move.
///
/// Blanket-implemented for every `Copy + Default + Send + Sync` type.
pub trait Texel: Copy + Default + Send + Sync + 'static {}

impl<T: Copy + Default + Send + Sync + 'static> Texel for T {}

/// Parity of a row, column or checkerboard cell index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

impl Parity {
    /// Parity of `index`.
    #[inline]
    pub const fn of(index: usize) -> Self {
        if index.is_multiple_of(2) {
            Self::Even
        } else {
            Self::Odd
        }
    }

    #[inline]
    const fn bit(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }
}

/// Which interleaved lines belong to which half of the split image.
///
/// There is no ratified standard for this. The default matches the
/// interlaced files most commonly found in the wild. Forward and reverse
/// transforms must be given the same convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterlaceConvention {
    /// Parity of the interlaced rows (or columns) that fill the first half
    /// of the split image: rows `0..H/2` of a top/bottom image, or columns
    /// `0..W/2` of a side-by-side image.
    pub lines: Parity,
    /// Parity of `x + y` for checkerboard pixels that fill the left half of
    /// the side-by-side image.
    pub checker: Parity,
}

impl InterlaceConvention {
    /// Odd lines fill the first half; checkerboard cells with even `x + y`
    /// fill the left half.
    pub const DEFAULT: Self = Self {
        lines: Parity::Odd,
        checker: Parity::Even,
    };

    /// Convention with explicit parities.
    pub const fn new(lines: Parity, checker: Parity) -> Self {
        Self { lines, checker }
    }

    /// Set the interlaced-line parity.
    pub const fn with_lines(mut self, lines: Parity) -> Self {
        self.lines = lines;
        self
    }

    /// Set the checkerboard parity.
    pub const fn with_checker(mut self, checker: Parity) -> Self {
        self.checker = checker;
        self
    }
}

impl Default for InterlaceConvention {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ===========================================================================
// Shared helpers
// ===========================================================================

/// Allocate a `width × height` image and fill it one row at a time.
///
/// `row(y, out)` must write output row `y` using only the source image, so
/// rows can be produced in any order.
pub(crate) fn fill_rows<T, F>(width: usize, height: usize, row: F) -> ImgVec<T>
where
    T: Texel,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let mut buf = vec![T::default(); width * height];
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        buf.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, out)| row(y, out));
    }
    #[cfg(not(feature = "rayon"))]
    buf.chunks_mut(width)
        .enumerate()
        .for_each(|(y, out)| row(y, out));
    ImgVec::new(buf, width, height)
}

/// Pixels of source row `y`, without stride padding.
#[inline]
pub(crate) fn src_row<'b, T>(src: &'b ImgRef<'_, T>, y: usize) -> &'b [T] {
    let buf: &[T] = src.buf();
    let start = y * src.stride();
    &buf[start..start + src.width()]
}

#[inline]
pub(crate) fn ensure_nonempty(
    width: usize,
    height: usize,
    src_width: usize,
    src_height: usize,
) -> Result<(), CodecError> {
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions {
            width: src_width,
            height: src_height,
        });
    }
    Ok(())
}

fn note_odd(what: &str, dim: usize) {
    if !dim.is_multiple_of(2) {
        log::debug!("{what}: odd dimension {dim}, truncating to {}", dim / 2 * 2);
    }
}

/// Copy a `width × height` region starting at (`x`, `y`) into a new image.
///
/// The region is clipped to the source; clipped pixels stay at default.
pub(crate) fn crop<T: Texel>(
    src: ImgRef<'_, T>,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Result<ImgVec<T>, CodecError> {
    ensure_nonempty(width, height, src.width(), src.height())?;
    let (sw, sh) = (src.width(), src.height());
    Ok(fill_rows(width, height, |row, out| {
        let sy = y + row;
        if sy >= sh || x >= sw {
            return;
        }
        let end = (x + width).min(sw);
        out[..end - x].copy_from_slice(&src_row(&src, sy)[x..end]);
    }))
}

// ===========================================================================
// Horizontal interlaced <-> top/bottom
// ===========================================================================

/// Split a horizontally interlaced image into top/bottom halves.
///
/// Rows of parity `convention.lines` go to rows `0..H/2` in order; the
/// other rows go to rows `H/2..H`. Same size as the input.
///
/// When `H` is odd, a row of the first parity beyond row `2 * (H/2)` has no
/// destination and is dropped, and the last output row may be left at
/// default.
pub fn horizontal_interlaced_to_top_bottom<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("horizontal_interlaced_to_top_bottom", h);
    let half = h / 2;
    let first = convention.lines.bit();
    Ok(fill_rows(w, h, |y, out| {
        let sy = if y < half {
            2 * y + first
        } else {
            2 * (y - half) + (1 - first)
        };
        if sy < h {
            out.copy_from_slice(src_row(&src, sy));
        }
    }))
}

/// Interleave the halves of a top/bottom image row by row.
///
/// Inverse of [`horizontal_interlaced_to_top_bottom`]. Output rows of the
/// first parity read only rows `0..H/2`; when that half has no row for
/// them (odd `H`) they are left at default rather than taking a row of the
/// other eye.
pub fn top_bottom_to_horizontal_interlaced<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("top_bottom_to_horizontal_interlaced", h);
    let half = h / 2;
    let first = convention.lines;
    Ok(fill_rows(w, h, |y, out| {
        let sy = if Parity::of(y) == first {
            Some(y / 2).filter(|&sy| sy < half)
        } else {
            Some(half + y / 2).filter(|&sy| sy < h)
        };
        if let Some(sy) = sy {
            out.copy_from_slice(src_row(&src, sy));
        }
    }))
}

// ===========================================================================
// Vertical interlaced <-> side-by-side
// ===========================================================================

/// Split a vertically interlaced image into side-by-side halves.
///
/// Columns of parity `convention.lines` go to columns `0..W/2` in order;
/// the other columns go to `W/2..W`. Same size as the input.
///
/// When `W` is odd, a column of the first parity beyond column
/// `2 * (W/2)` is dropped, and the last output column may be left at
/// default.
pub fn vertical_interlaced_to_side_by_side<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("vertical_interlaced_to_side_by_side", w);
    let half = w / 2;
    let first = convention.lines.bit();
    Ok(fill_rows(w, h, |y, out| {
        let row = src_row(&src, y);
        for (x, px) in out.iter_mut().enumerate() {
            let sx = if x < half {
                2 * x + first
            } else {
                2 * (x - half) + (1 - first)
            };
            if sx < w {
                *px = row[sx];
            }
        }
    }))
}

/// Interleave the halves of a side-by-side image column by column.
///
/// Inverse of [`vertical_interlaced_to_side_by_side`]. Output columns of
/// the first parity read only columns `0..W/2` and stay at default when
/// that half runs out (odd `W`).
pub fn side_by_side_to_vertical_interlaced<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("side_by_side_to_vertical_interlaced", w);
    let half = w / 2;
    let first = convention.lines;
    Ok(fill_rows(w, h, |y, out| {
        let row = src_row(&src, y);
        for (x, px) in out.iter_mut().enumerate() {
            let sx = if Parity::of(x) == first {
                Some(x / 2).filter(|&sx| sx < half)
            } else {
                Some(half + x / 2).filter(|&sx| sx < w)
            };
            if let Some(sx) = sx {
                *px = row[sx];
            }
        }
    }))
}

// ===========================================================================
// Checkerboard <-> side-by-side
// ===========================================================================

/// Split a checkerboard image into side-by-side halves.
///
/// Pixels where `(x + y)` has parity `convention.checker` go to the left
/// half at column `x / 2`; the rest go to the right half at
/// `W/2 + x / 2`, same row. Same size as the input.
///
/// When `W` is odd the left half is one column short: a left-eye pixel in
/// the last column is dropped, and on rows where the last column belongs
/// to the right eye, the last output column is left at default.
pub fn checkerboard_to_side_by_side<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("checkerboard_to_side_by_side", w);
    let half = w / 2;
    let checker = convention.checker.bit();
    Ok(fill_rows(w, h, |y, out| {
        let row = src_row(&src, y);
        // Column parity of the left-half pixels on this row.
        let q = (checker + y) % 2;
        for (x, px) in out.iter_mut().enumerate() {
            let sx = if x < half {
                2 * x + q
            } else {
                2 * (x - half) + (1 - q)
            };
            if sx < w {
                *px = row[sx];
            }
        }
    }))
}

/// Weave the halves of a side-by-side image into a checkerboard.
///
/// Inverse of [`checkerboard_to_side_by_side`]. Left-eye cells read only
/// columns `0..W/2`; when `W` is odd, a left-eye cell in the last column has
/// no source and is left at default instead of taking a right-eye pixel.
pub fn side_by_side_to_checkerboard<T: Texel>(
    src: ImgRef<'_, T>,
    convention: InterlaceConvention,
) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    note_odd("side_by_side_to_checkerboard", w);
    let half = w / 2;
    let checker = convention.checker;
    Ok(fill_rows(w, h, |y, out| {
        let row = src_row(&src, y);
        for (x, px) in out.iter_mut().enumerate() {
            let sx = if Parity::of(x + y) == checker {
                Some(x / 2).filter(|&sx| sx < half)
            } else {
                Some(half + x / 2).filter(|&sx| sx < w)
            };
            if let Some(sx) = sx {
                *px = row[sx];
            }
        }
    }))
}

// ===========================================================================
// Anaglyph <-> side-by-side
// ===========================================================================

/// Separate an anaglyph into a side-by-side image twice as wide.
///
/// The left half holds the source filtered through `colors.left`, the right
/// half the source filtered through `colors.right`. Lost channels cannot
/// be recovered. With `monochrome`, each filtered pixel is replaced by its
/// luma, which is easier on the eyes than two differently tinted views.
pub fn anaglyph_to_side_by_side<P: AnaglyphPixel>(
    src: ImgRef<'_, P>,
    colors: AnaglyphColors,
    monochrome: bool,
) -> Result<ImgVec<P>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    let left = colors.filter(Eye::Left);
    let right = colors.filter(Eye::Right);
    Ok(fill_rows(w * 2, h, |y, out| {
        let row = src_row(&src, y);
        let (out_left, out_right) = out.split_at_mut(w);
        for ((l, r), &px) in out_left.iter_mut().zip(out_right.iter_mut()).zip(row) {
            *l = px.filtered(left);
            *r = px.filtered(right);
            if monochrome {
                *l = l.grayscale();
                *r = r.grayscale();
            }
        }
    }))
}

/// Combine the halves of a side-by-side image into one anaglyph half as
/// wide.
///
/// Each color channel comes from the eye whose filter weights it more;
/// when both filters weight a channel equally that channel is zero. Alpha
/// is opaque. When `W` is odd the last column is ignored.
pub fn side_by_side_to_anaglyph<P: AnaglyphPixel>(
    src: ImgRef<'_, P>,
    colors: AnaglyphColors,
) -> Result<ImgVec<P>, CodecError> {
    let (w, h) = (src.width(), src.height());
    let half = w / 2;
    ensure_nonempty(half, h, w, h)?;
    note_odd("side_by_side_to_anaglyph", w);
    let sources = colors.channel_sources();
    Ok(fill_rows(half, h, |y, out| {
        let row = src_row(&src, y);
        let (left, right) = row.split_at(half);
        for ((px, &l), &r) in out.iter_mut().zip(left).zip(right) {
            *px = combine_with(sources, l, r);
        }
    }))
}

// ===========================================================================
// Lossless restacking and eye pairs
// ===========================================================================

/// Restack a `W×H` side-by-side image into a `W/2 × 2H` top/bottom image.
///
/// The left half becomes the visual top (rows `H..2H`), the right half the
/// bottom (rows `0..H`). No resampling.
pub fn side_by_side_to_top_bottom<T: Texel>(src: ImgRef<'_, T>) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    let half = w / 2;
    ensure_nonempty(half, h, w, h)?;
    note_odd("side_by_side_to_top_bottom", w);
    Ok(fill_rows(half, h * 2, |y, out| {
        if y < h {
            out.copy_from_slice(&src_row(&src, y)[half..half * 2]);
        } else {
            out.copy_from_slice(&src_row(&src, y - h)[..half]);
        }
    }))
}

/// Restack a `W×H` top/bottom image into a `2W × H/2` side-by-side image.
///
/// Inverse of [`side_by_side_to_top_bottom`].
pub fn top_bottom_to_side_by_side<T: Texel>(src: ImgRef<'_, T>) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    let half = h / 2;
    ensure_nonempty(w, half, w, h)?;
    note_odd("top_bottom_to_side_by_side", h);
    Ok(fill_rows(w * 2, half, |y, out| {
        let (left, right) = out.split_at_mut(w);
        left.copy_from_slice(src_row(&src, half + y));
        right.copy_from_slice(src_row(&src, y));
    }))
}

/// Place two eye images next to each other.
///
/// Heights must match. The output width is the sum of both widths.
pub fn join_side_by_side<T: Texel>(
    first: ImgRef<'_, T>,
    second: ImgRef<'_, T>,
) -> Result<ImgVec<T>, CodecError> {
    if first.height() != second.height() {
        return Err(CodecError::InvalidDimensions {
            width: second.width(),
            height: second.height(),
        });
    }
    let (fw, sw, h) = (first.width(), second.width(), first.height());
    ensure_nonempty(fw + sw, h, fw, h)?;
    Ok(fill_rows(fw + sw, h, |y, out| {
        let (a, b) = out.split_at_mut(fw);
        a.copy_from_slice(src_row(&first, y));
        b.copy_from_slice(src_row(&second, y));
    }))
}

/// Cut a side-by-side image into its two halves.
///
/// For odd widths the last column is dropped.
pub fn split_side_by_side<T: Texel>(
    src: ImgRef<'_, T>,
) -> Result<(ImgVec<T>, ImgVec<T>), CodecError> {
    let (w, h) = (src.width(), src.height());
    let half = w / 2;
    ensure_nonempty(half, h, w, h)?;
    note_odd("split_side_by_side", w);
    Ok((crop(src, 0, 0, half, h)?, crop(src, half, 0, half, h)?))
}
