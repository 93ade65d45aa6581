/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use relic_core::bytestream::ByteIoError;
use relic_core::errors::{DecodeErrorKind, LayoutErrors, PaletteErrors, RleErrors};

/// Errors that can occur while decoding a TGA image
#[non_exhaustive]
pub enum TgaDecodeErrors {
    /// Image type byte that no TGA writer produces
    InvalidImageType(u8),
    /// Color map type other than 0 or 1
    InvalidColorMapType(u8),
    /// A valid image type we do not decode (no data, Huffman)
    UnsupportedImageType(u8),
    /// Pixel depth not valid for the image type, (image type, depth)
    UnsupportedDepth(u8, u8),
    /// An indexed image without a color map
    MissingColorMap,
    /// Color map entry size we cannot convert, in strict mode
    UnsupportedColorMapDepth(u8),
    /// An indexed image with more than 256 colors
    TooManyColors(u16),
    /// Two or four way interleaved rows
    Interleaved(u8),
    /// Rows stored right to left
    RightOrigin,
    /// Generic message
    GenericStatic(&'static str),
    RleErrors(RleErrors),
    LayoutErrors(LayoutErrors),
    PaletteErrors(PaletteErrors),
    IoErrors(ByteIoError)
}

impl TgaDecodeErrors {
    /// The failure class of this error
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::InvalidImageType(_) | Self::InvalidColorMapType(_) => DecodeErrorKind::BadMagic,
            Self::UnsupportedImageType(_)
            | Self::UnsupportedDepth(..)
            | Self::MissingColorMap
            | Self::UnsupportedColorMapDepth(_)
            | Self::Interleaved(_)
            | Self::RightOrigin => DecodeErrorKind::UnsupportedVariant,
            Self::TooManyColors(_) | Self::GenericStatic(_) => DecodeErrorKind::MalformedData,
            Self::RleErrors(err) => err.kind(),
            Self::LayoutErrors(err) => err.kind(),
            Self::PaletteErrors(err) => err.kind(),
            Self::IoErrors(_) => DecodeErrorKind::Truncated
        }
    }
}

impl Debug for TgaDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidImageType(kind) => {
                writeln!(f, "Invalid image type {kind}, stream is likely not a TGA")
            }
            Self::InvalidColorMapType(kind) => {
                writeln!(f, "Invalid color map type {kind}")
            }
            Self::UnsupportedImageType(kind) => {
                writeln!(f, "Unsupported image type {kind}")
            }
            Self::UnsupportedDepth(kind, depth) => {
                writeln!(f, "Unsupported pixel depth {depth} for image type {kind}")
            }
            Self::MissingColorMap => {
                writeln!(f, "Color mapped image without a color map")
            }
            Self::UnsupportedColorMapDepth(depth) => {
                writeln!(f, "Unsupported color map entry depth {depth}")
            }
            Self::TooManyColors(colors) => {
                writeln!(f, "Color map of {colors} entries exceeds 256")
            }
            Self::Interleaved(flags) => {
                writeln!(f, "Interleaved images are not supported, descriptor {flags:#x}")
            }
            Self::RightOrigin => {
                writeln!(f, "Right to left images are not supported")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::RleErrors(err) => {
                writeln!(f, "{:?}", err)
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

impl Display for TgaDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TgaDecodeErrors {}

impl From<ByteIoError> for TgaDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        TgaDecodeErrors::IoErrors(value)
    }
}

impl From<RleErrors> for TgaDecodeErrors {
    fn from(value: RleErrors) -> Self {
        TgaDecodeErrors::RleErrors(value)
    }
}

impl From<LayoutErrors> for TgaDecodeErrors {
    fn from(value: LayoutErrors) -> Self {
        TgaDecodeErrors::LayoutErrors(value)
    }
}

impl From<PaletteErrors> for TgaDecodeErrors {
    fn from(value: PaletteErrors) -> Self {
        TgaDecodeErrors::PaletteErrors(value)
    }
}

impl From<&'static str> for TgaDecodeErrors {
    fn from(value: &'static str) -> Self {
        TgaDecodeErrors::GenericStatic(value)
    }
}
