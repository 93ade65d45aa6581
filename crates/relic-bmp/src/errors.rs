/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use relic_core::bytestream::ByteIoError;
use relic_core::errors::{DecodeErrorKind, LayoutErrors, PaletteErrors};

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecodeErrors {
    /// The stream is neither a bitmap (`BM`) nor an
    /// icon or cursor directory
    InvalidMagicBytes,
    /// The icon directory lists no images
    EmptyDirectory,
    /// Info header size we do not handle
    UnsupportedHeaderSize(u32),
    /// Compression other than `BI_RGB`
    UnsupportedCompression(u32),
    /// Bits per pixel other than 1, 4, 8, 24 or 32
    UnsupportedDepth(u16),
    /// Palette entry count larger than allowed
    TooManyColors(u32),
    /// Too large or negative dimensions, (dimension, limit, found)
    TooLargeDimensions(&'static str, usize, i64),
    /// Generic message
    GenericStatic(&'static str),
    LayoutErrors(LayoutErrors),
    PaletteErrors(PaletteErrors),
    IoErrors(ByteIoError)
}

impl BmpDecodeErrors {
    /// The failure class of this error
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::InvalidMagicBytes => DecodeErrorKind::BadMagic,
            Self::UnsupportedHeaderSize(_)
            | Self::UnsupportedCompression(_)
            | Self::UnsupportedDepth(_) => DecodeErrorKind::UnsupportedVariant,
            Self::EmptyDirectory
            | Self::TooManyColors(_)
            | Self::TooLargeDimensions(..)
            | Self::GenericStatic(_) => DecodeErrorKind::MalformedData,
            Self::LayoutErrors(err) => err.kind(),
            Self::PaletteErrors(err) => err.kind(),
            Self::IoErrors(_) => DecodeErrorKind::Truncated
        }
    }
}

impl Debug for BmpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(
                    f,
                    "Invalid magic bytes, stream is not a bitmap, icon or cursor"
                )
            }
            Self::EmptyDirectory => {
                writeln!(f, "Icon directory has no entries")
            }
            Self::UnsupportedHeaderSize(size) => {
                writeln!(f, "Unsupported bitmap info header size {size}")
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(f, "Unsupported compression {compression}, only BI_RGB is handled")
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}")
            }
            Self::TooManyColors(colors) => {
                writeln!(f, "Incorrect number of palette colors {colors}")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} is outside 0..={expected}"
                )
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::LayoutErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::PaletteErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpDecodeErrors {}

impl From<ByteIoError> for BmpDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecodeErrors::IoErrors(value)
    }
}

impl From<LayoutErrors> for BmpDecodeErrors {
    fn from(value: LayoutErrors) -> Self {
        BmpDecodeErrors::LayoutErrors(value)
    }
}

impl From<PaletteErrors> for BmpDecodeErrors {
    fn from(value: PaletteErrors) -> Self {
        BmpDecodeErrors::PaletteErrors(value)
    }
}

impl From<&'static str> for BmpDecodeErrors {
    fn from(value: &'static str) -> Self {
        BmpDecodeErrors::GenericStatic(value)
    }
}
