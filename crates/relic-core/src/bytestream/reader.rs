/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::{Debug, Display, Formatter};

use crate::bytestream::ByteReaderTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here to allow this to work in no-std crates
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum ByteSeek {
    /// Sets the offset to the provided number of bytes.
    Start(u64),

    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    End(i64),

    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    Current(i64)
}

impl ByteSeek {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    ///
    /// This is only present when std feature is present
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            ByteSeek::Start(pos) => std::io::SeekFrom::Start(pos),
            ByteSeek::End(pos) => std::io::SeekFrom::End(pos),
            ByteSeek::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors raised by byte sources
pub enum ByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    /// requested, available
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// Endian aware reader over a byte source
///
/// All integer reads are fallible, a stream that ends early
/// yields an error rather than a default value.
pub struct ByteReader<T: ByteReaderTrait> {
    inner: T
}

impl<T: ByteReaderTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader { inner: source }
    }
    /// Destroy this reader returning
    /// the underlying source of the bytes
    /// from which we were decoding
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, ByteIoError> {
        let num = i64::try_from(num)?;
        self.inner.byte_seek(ByteSeek::Current(num))
    }

    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, ByteIoError> {
        let num = i64::try_from(num)?;
        self.inner.byte_seek(ByteSeek::Current(-num))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError> {
        self.inner.byte_seek(from)
    }

    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Copy up to `buf.len()` bytes from the current position
    /// without consuming them.
    ///
    /// Returns how many bytes were available, a short stream is not an error here
    /// so probing code can decide on its own what too few bytes means.
    #[inline]
    pub fn peek_available(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.inner.peek_bytes(buf)
    }

    /// Look ahead `N` bytes without moving the stream, erroring if the
    /// stream doesn't have that many bytes.
    #[inline]
    pub fn peek_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.peek_exact_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), ByteIoError> {
        self.seek(ByteSeek::Start(position))?;

        Ok(())
    }

    /// Number of bytes between the current position and the end of the stream
    ///
    /// The position is unchanged afterwards
    pub fn remaining(&mut self) -> Result<u64, ByteIoError> {
        let position = self.position()?;
        let end = self.seek(ByteSeek::End(0))?;
        self.set_position(position)?;

        Ok(end.saturating_sub(position))
    }

    /// Error out if fewer than `needed` bytes are left in the stream
    ///
    /// Lets decoders refuse a body before allocating room for it
    pub fn ensure_remaining(&mut self, needed: u64) -> Result<(), ByteIoError> {
        let remaining = self.remaining()?;

        if remaining < needed {
            return Err(ByteIoError::NotEnoughBytes(
                usize::try_from(needed).unwrap_or(usize::MAX),
                usize::try_from(remaining).unwrap_or(usize::MAX)
            ));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, ByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.byte_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.inner.read_bytes(buf)
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T:ByteReaderTrait> ByteReader<T>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                self.inner.read_const_bytes(&mut space)?;

                match mode {
                    Mode::BE => Ok($int_type::from_be_bytes(space)),
                    Mode::LE => Ok($int_type::from_le_bytes(space))
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(get_u16_inner_or_die, get_u16_be_err, get_u16_le_err, u16);
get_single_type!(get_u32_inner_or_die, get_u32_be_err, get_u32_le_err, u32);
get_single_type!(get_i16_inner_or_die, get_i16_be_err, get_i16_le_err, i16);
get_single_type!(get_i32_inner_or_die, get_i32_be_err, get_i32_le_err, i32);
