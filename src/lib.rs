//! Colorimetric analysis primitives for face and content pipelines.
//!
//! Two signals are computed over RGBA pixel data:
//!
//! * a per-pixel skin mask with its coverage ratio, produced by
//!   [`masking::skin_masker::SkinMasker`], used to gate face candidates on
//!   skin tone;
//! * a luminance-spread content score, produced by
//!   [`content::content_analyzer::ContentAnalyzer`], separating flat
//!   synthetic fills from camera footage.
//!
//! Both engines read pixels through the [`shared::pixel_source::PixelSource`]
//! seam and run a packed row walk whenever the backing store exposes its
//! raw RGBA bytes, falling back to per-pixel accessors otherwise. The two
//! walks are observably equivalent; packing only changes speed.

pub mod content;
pub mod masking;
pub mod shared;
