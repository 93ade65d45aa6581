/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An IFF ILBM and PBM decoder
//!
//! Decodes Amiga interleaved bitmaps (`ILBM`) and their chunky sibling
//! (`PBM `) into a [`PixelBuffer`](relic_core::buffer::PixelBuffer).
//!
//! # Supported features
//! - 1 to 8 bitplanes, with or without a stencil plane, as `Indexed8`
//! - 24 bitplane true color images as `Rgb24`
//! - Hold-And-Modify (HAM6, HAM8) images as `Rgb24`
//! - Extra-Half-Bright palettes
//! - Uncompressed and byte-run compressed bodies
//!
//! Widths are rounded up to a multiple of 16, the padding columns
//! of the last plane word are part of the output.
#![no_std]
#![macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use crate::decoder::{probe_ilbm, IlbmDecoder};
pub use crate::errors::IlbmDecodeErrors;
pub use crate::header::{BitmapHeader, FormKind, ViewMode};

mod decoder;
mod errors;
mod header;
mod planar;
