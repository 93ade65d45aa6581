/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A BMP, ICO and CUR decoder
//!
//! This crate decodes Windows device independent bitmaps, either as
//! plain `.bmp` files or wrapped in the icon directory used by `.ico` and
//! `.cur` files, into a [`PixelBuffer`](relic_core::buffer::PixelBuffer).
//!
//! # Supported formats
//! - Uncompressed (`BI_RGB`) bitmaps of 1, 4, 8, 24 and 32 bits per pixel
//! - Icons and cursors with a 40 byte info header, including the AND mask
//! - Plain bitmaps with 40, 108 and 124 byte info headers
//!
//! # Unsupported formats
//! - RLE and bitfield compression
//! - Embedded PNG icons
//!
//! Output is always `Bgra32`, top-down.
#![no_std]
#![macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use crate::common::{ContainerKind, IconDirEntry};
pub use crate::decoder::{probe_bmp, probe_cur, probe_ico, BmpDecoder};
pub use crate::errors::BmpDecodeErrors;

mod common;
mod decoder;
mod dib;
mod errors;
mod utils;
