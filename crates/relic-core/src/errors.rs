/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors shared by the decoders
//!
//! Every decoder crate has its own error enum, each of them can be
//! reduced to a [`DecodeErrorKind`], the common taxonomy callers can
//! match on without knowing which decoder produced the failure.
use core::fmt::{Debug, Display, Formatter};

use crate::bytestream::ByteIoError;

/// The class a decode failure belongs to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeErrorKind {
    /// The stream ended before a read could be satisfied
    Truncated,
    /// The stream does not start with the format's signature
    BadMagic,
    /// A valid but unhandled compression, depth, origin or header size
    UnsupportedVariant,
    /// Fields that contradict each other or the data that follows
    MalformedData,
    /// The pixel store could not be allocated
    OutOfMemory
}

impl Display for DecodeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DecodeErrorKind::Truncated => "truncated stream",
            DecodeErrorKind::BadMagic => "bad magic bytes",
            DecodeErrorKind::UnsupportedVariant => "unsupported variant",
            DecodeErrorKind::MalformedData => "malformed data",
            DecodeErrorKind::OutOfMemory => "out of memory"
        };
        f.write_str(name)
    }
}

/// Errors raised while validating and allocating a pixel layout
pub enum LayoutErrors {
    /// Width or height is zero
    ZeroDimensions,
    /// Width exceeded the configured limit, (found, limit)
    TooLargeWidth(usize, usize),
    /// Height exceeded the configured limit, (found, limit)
    TooLargeHeight(usize, usize),
    /// stride * height does not fit a usize
    SizeOverflow,
    /// Allocating this many bytes failed
    AllocationFailed(usize),
    /// Pixel store length does not equal stride * height, (expected, found)
    LengthMismatch(usize, usize),
    /// Palette presence does not match the pixel format
    PaletteMismatch,
    /// Color key out of range for the pixel format, (key, max)
    ColorKeyOutOfRange(u32, u32)
}

impl LayoutErrors {
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            LayoutErrors::AllocationFailed(_) => DecodeErrorKind::OutOfMemory,
            LayoutErrors::ZeroDimensions
            | LayoutErrors::TooLargeWidth(..)
            | LayoutErrors::TooLargeHeight(..)
            | LayoutErrors::SizeOverflow
            | LayoutErrors::LengthMismatch(..)
            | LayoutErrors::PaletteMismatch
            | LayoutErrors::ColorKeyOutOfRange(..) => DecodeErrorKind::MalformedData
        }
    }
}

impl Debug for LayoutErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            LayoutErrors::ZeroDimensions => writeln!(f, "Width or height is zero"),
            LayoutErrors::TooLargeWidth(found, limit) => {
                writeln!(f, "Too large width, {found} exceeds limit {limit}")
            }
            LayoutErrors::TooLargeHeight(found, limit) => {
                writeln!(f, "Too large height, {found} exceeds limit {limit}")
            }
            LayoutErrors::SizeOverflow => writeln!(f, "Image size overflows usize"),
            LayoutErrors::AllocationFailed(size) => {
                writeln!(f, "Could not allocate {size} bytes for pixels")
            }
            LayoutErrors::LengthMismatch(expected, found) => {
                writeln!(f, "Pixel store length mismatch, expected {expected} but found {found}")
            }
            LayoutErrors::PaletteMismatch => {
                writeln!(f, "A palette must be present exactly when the format is indexed")
            }
            LayoutErrors::ColorKeyOutOfRange(key, max) => {
                writeln!(f, "Color key {key} is out of range, max allowed is {max}")
            }
        }
    }
}

impl Display for LayoutErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutErrors {}

/// Errors raised by the run length transforms
pub enum RleErrors {
    /// A run wanted more bytes than the row had room for, (wanted, room)
    Overrun(usize, usize),
    IoErrors(ByteIoError)
}

impl RleErrors {
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            RleErrors::Overrun(..) => DecodeErrorKind::MalformedData,
            RleErrors::IoErrors(_) => DecodeErrorKind::Truncated
        }
    }
}

impl Debug for RleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RleErrors::Overrun(wanted, room) => {
                writeln!(f, "Run of {wanted} bytes overruns row, only {room} bytes left")
            }
            RleErrors::IoErrors(err) => writeln!(f, "{:?}", err)
        }
    }
}

impl Display for RleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RleErrors {}

impl From<ByteIoError> for RleErrors {
    fn from(value: ByteIoError) -> Self {
        RleErrors::IoErrors(value)
    }
}

/// Errors raised by the palette table
pub enum PaletteErrors {
    /// More than 256 entries were requested
    TooManyEntries(usize),
    /// Index past the end of the table, (index, length)
    OutOfBounds(usize, usize)
}

impl PaletteErrors {
    pub const fn kind(&self) -> DecodeErrorKind {
        DecodeErrorKind::MalformedData
    }
}

impl Debug for PaletteErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PaletteErrors::TooManyEntries(count) => {
                writeln!(f, "Palette of {count} entries exceeds 256")
            }
            PaletteErrors::OutOfBounds(index, len) => {
                writeln!(f, "Palette index {index} out of bounds for {len} entries")
            }
        }
    }
}

impl Display for PaletteErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PaletteErrors {}
