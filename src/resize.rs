//! Nearest-neighbour squash and vertical flip.

use imgref::{ImgRef, ImgVec};

use crate::codec::{ensure_nonempty, fill_rows, src_row, Texel};
use crate::{CodecError, SplitAxis};

/// Output size of an assembled stereo image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Each eye keeps its full resolution; the split image is twice as
    /// large along the split axis.
    #[default]
    Full,
    /// Each eye is squashed to half resolution along the split axis, so
    /// the split image has the size of one eye.
    Half,
}

impl ImageSize {
    /// Resize a split image assembled at full size.
    ///
    /// `Half` squashes the width of side-by-side images and the height of
    /// top/bottom images. Other axes, and `Full`, return a copy.
    pub fn apply<T: Texel>(
        self,
        src: ImgRef<'_, T>,
        axis: SplitAxis,
    ) -> Result<ImgVec<T>, CodecError> {
        let (w, h) = (src.width(), src.height());
        match (self, axis) {
            (Self::Half, SplitAxis::Horizontal) => squash(src, w / 2, h),
            (Self::Half, SplitAxis::Vertical) => squash(src, w, h / 2),
            _ => squash(src, w, h),
        }
    }
}

/// Resample to `width × height` by nearest neighbour.
///
/// Output pixel `i` along an axis reads source index
/// `floor(i * (src_len - 1) / out_len)`, so the last source row and column
/// are never sampled when shrinking. Equal sizes copy the image.
pub fn squash<T: Texel>(
    src: ImgRef<'_, T>,
    width: usize,
    height: usize,
) -> Result<ImgVec<T>, CodecError> {
    let (sw, sh) = (src.width(), src.height());
    ensure_nonempty(width, height, sw, sh)?;
    if (width, height) == (sw, sh) {
        return Ok(fill_rows(width, height, |y, out| {
            out.copy_from_slice(src_row(&src, y))
        }));
    }
    let sample = |i: usize, src_len: usize, out_len: usize| -> usize {
        (i as u64 * src_len.saturating_sub(1) as u64 / out_len as u64) as usize
    };
    Ok(fill_rows(width, height, |y, out| {
        let row = src_row(&src, sample(y, sh, height));
        for (x, px) in out.iter_mut().enumerate() {
            *px = row[sample(x, sw, width)];
        }
    }))
}

/// Mirror an image top to bottom.
pub fn flip_vertical<T: Texel>(src: ImgRef<'_, T>) -> Result<ImgVec<T>, CodecError> {
    let (w, h) = (src.width(), src.height());
    ensure_nonempty(w, h, w, h)?;
    Ok(fill_rows(w, h, |y, out| {
        out.copy_from_slice(src_row(&src, h - 1 - y))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn numbered(w: usize, h: usize) -> ImgVec<u16> {
        let buf: Vec<u16> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (y * 100 + x) as u16))
            .collect();
        ImgVec::new(buf, w, h)
    }

    #[test]
    fn squash_half_width() {
        let img = numbered(8, 2);
        let out = squash(img.as_ref(), 4, 2).unwrap();
        // Ratio 7/4: columns 0, 1, 3, 5. Rows: ratio 1/2 -> 0, 0.
        assert_eq!(out.buf().as_slice(), &[0, 1, 3, 5, 0, 1, 3, 5]);
    }

    #[test]
    fn squash_same_size_copies() {
        let img = numbered(3, 3);
        assert_eq!(squash(img.as_ref(), 3, 3).unwrap(), img);
    }

    #[test]
    fn squash_to_zero_fails() {
        let img = numbered(1, 3);
        assert_eq!(
            ImageSize::Half.apply(img.as_ref(), SplitAxis::Horizontal),
            Err(CodecError::InvalidDimensions {
                width: 1,
                height: 3
            })
        );
    }

    #[test]
    fn half_size_along_axis() {
        let img = numbered(4, 4);
        let sbs = ImageSize::Half
            .apply(img.as_ref(), SplitAxis::Horizontal)
            .unwrap();
        assert_eq!((sbs.width(), sbs.height()), (2, 4));
        let tb = ImageSize::Half
            .apply(img.as_ref(), SplitAxis::Vertical)
            .unwrap();
        assert_eq!((tb.width(), tb.height()), (4, 2));
        let full = ImageSize::Full
            .apply(img.as_ref(), SplitAxis::Horizontal)
            .unwrap();
        assert_eq!(full, img);
    }

    #[test]
    fn flip() {
        let img = ImgVec::new(vec![1u16, 2, 3, 4, 5, 6], 2, 3);
        let out = flip_vertical(img.as_ref()).unwrap();
        assert_eq!(out.buf().as_slice(), &[5, 6, 3, 4, 1, 2]);
        assert_eq!(flip_vertical(out.as_ref()).unwrap(), img);
    }
}
