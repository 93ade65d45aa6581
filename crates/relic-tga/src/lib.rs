/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Truevision TGA decoder
//!
//! # Supported formats
//! - Color mapped images with 8 bit indices, raw and run length encoded
//! - True color images of 15, 16, 24 and 32 bits, raw and run length encoded
//! - 8 bit greyscale images, decoded as indexed with an identity palette
//!
//! # Unsupported formats
//! - Interleaved rows and right-to-left origins
//! - Huffman compressed types 32 and 33
//!
//! TGA has no signature, [`probe_tga`] checks that the header fields are
//! consistent with each other, which can accept data that is not a TGA.
#![no_std]
#![macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use crate::decoder::{probe_tga, TgaDecoder};
pub use crate::errors::TgaDecodeErrors;
pub use crate::header::{TgaHeader, TgaImageType};

mod decoder;
mod errors;
mod header;
