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

/// Errors that can occur while decoding an ILBM or PBM image
#[non_exhaustive]
pub enum IlbmDecodeErrors {
    /// The stream does not start with `FORM`
    InvalidMagicBytes,
    /// The form type is neither `ILBM` nor `PBM `
    UnknownFormType([u8; 4]),
    /// `BODY` was reached without a `BMHD` chunk
    MissingBitmapHeader,
    /// Plane count we cannot handle, (planes, is_ham)
    UnsupportedPlanes(u8, bool),
    /// Compression byte other than 0 or 1, in strict mode
    UnsupportedCompression(u8),
    /// A `CMAP` chunk with more than 256 entries, (chunk size)
    ColorMapTooLarge(u32),
    /// Generic message
    GenericStatic(&'static str),
    RleErrors(RleErrors),
    LayoutErrors(LayoutErrors),
    PaletteErrors(PaletteErrors),
    IoErrors(ByteIoError)
}

impl IlbmDecodeErrors {
    /// The failure class of this error
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::InvalidMagicBytes | Self::UnknownFormType(_) => DecodeErrorKind::BadMagic,
            Self::UnsupportedPlanes(..) | Self::UnsupportedCompression(_) => {
                DecodeErrorKind::UnsupportedVariant
            }
            Self::MissingBitmapHeader | Self::ColorMapTooLarge(_) | Self::GenericStatic(_) => {
                DecodeErrorKind::MalformedData
            }
            Self::RleErrors(err) => err.kind(),
            Self::LayoutErrors(err) => err.kind(),
            Self::PaletteErrors(err) => err.kind(),
            Self::IoErrors(_) => DecodeErrorKind::Truncated
        }
    }
}

impl Debug for IlbmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, stream does not start with FORM")
            }
            Self::UnknownFormType(form) => {
                writeln!(f, "Unknown IFF form type {:?}, expected ILBM or PBM", form)
            }
            Self::MissingBitmapHeader => {
                writeln!(f, "BODY chunk found before a BMHD chunk")
            }
            Self::UnsupportedPlanes(planes, ham) => {
                if *ham {
                    writeln!(f, "Unsupported number of planes {planes} for a HAM image")
                } else {
                    writeln!(f, "Unsupported number of planes {planes}")
                }
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(f, "Unsupported compression {compression}")
            }
            Self::ColorMapTooLarge(size) => {
                writeln!(f, "Color map of {size} bytes is larger than 256 entries")
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

impl Display for IlbmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IlbmDecodeErrors {}

impl From<ByteIoError> for IlbmDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        IlbmDecodeErrors::IoErrors(value)
    }
}

impl From<RleErrors> for IlbmDecodeErrors {
    fn from(value: RleErrors) -> Self {
        IlbmDecodeErrors::RleErrors(value)
    }
}

impl From<LayoutErrors> for IlbmDecodeErrors {
    fn from(value: LayoutErrors) -> Self {
        IlbmDecodeErrors::LayoutErrors(value)
    }
}

impl From<PaletteErrors> for IlbmDecodeErrors {
    fn from(value: PaletteErrors) -> Self {
        IlbmDecodeErrors::PaletteErrors(value)
    }
}

impl From<&'static str> for IlbmDecodeErrors {
    fn from(value: &'static str) -> Self {
        IlbmDecodeErrors::GenericStatic(value)
    }
}
