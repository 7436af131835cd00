//! Stereoscopic 3D frame conversion.
//!
//! This crate converts between the common ways of packing a stereo pair
//! into pixel data, and computes the per-eye texture transforms a viewer
//! needs to show one.
//!
//! - [`StereoFormat`] / [`DisplayFormat`]: stereo layouts and viewer modes
//! - [`codec`]: the pixel remapping transforms, on `imgref` buffers
//! - [`convert()`] / [`plan`]: any format to any format via the split layouts
//! - [`StereoImage`] / [`FrameData`]: single-buffer or eye-pair frames
//! - [`ConvergenceState`]: convergence bounds and per-eye scale/offset
//! - [`StereoSettings`]: per-image display settings
//!
//! Pixel buffers are bottom-up: row 0 is the bottom row of the image.
//!
//! # Example
//!
//! ```
//! use stereoframe::{convert, ConvertOptions, ImgVec, StereoFormat, StereoImage};
//! use stereoframe::rgb::Rgba;
//!
//! let sbs = ImgVec::new(vec![Rgba::new(0u8, 0, 0, 255); 8 * 4], 8, 4);
//! let out = convert(
//!     StereoImage::Single(sbs),
//!     StereoFormat::SideBySide,
//!     StereoFormat::HorizontalInterlaced,
//!     &ConvertOptions::new(),
//! )
//! .unwrap();
//! let hi = out.into_single().unwrap();
//! assert_eq!((hi.width(), hi.height()), (4, 8));
//! ```
//!
//! # Features
//!
//! - `rayon`: compute output rows in parallel. Results are identical.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod codec;
mod convergence;
mod convert;
mod error;
mod format;
mod frame;
mod limits;
mod pixel;
mod resize;
mod settings;

pub use codec::{InterlaceConvention, Parity, Texel};
pub use convergence::{
    maximum_allowed_convergence, tile_offset, tile_scale, ConvergenceMode, ConvergenceState,
    EyeTransform,
};
pub use convert::{convert, plan, ConversionPlan, ConvertOptions, Step};
pub use error::{CodecError, LimitExceeded};
pub use format::{DisplayFormat, Eye, SplitAxis, StereoFormat};
pub use frame::{extract_eye, FrameData, StereoImage};
pub use limits::ConversionLimits;
pub use pixel::{AnaglyphColors, AnaglyphPixel};
pub use resize::{flip_vertical, squash, ImageSize};
pub use settings::StereoSettings;

// Re-exports for callers building buffers.
pub use glam::Vec2;
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb;
pub use rgb::alt::BGRA as Bgra;
pub use rgb::{Rgb, Rgba};
