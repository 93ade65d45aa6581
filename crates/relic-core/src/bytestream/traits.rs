/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for byte sources read by relic decoders
//!
//! This exposes the trait and implementations for readers
//! consumed by the decoders.

use alloc::vec::Vec;

use crate::bytestream::reader::{ByteIoError, ByteSeek};

/// The input trait implemented for byte sources.
///
/// This provides the basic functions decoders need: exact reads,
/// peeks that do not move the stream, seeking and position queries.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over [`Cursor`](std::io::Cursor), it works without `std`.
///
/// The trait is also implemented for `&mut T`, so a caller can lend a
/// stream to a decoder and inspect its position once the decoder is dropped.
pub trait ByteReaderTrait {
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    ///  ## Errors
    /// In case of an error, the implementation should not increment the internal position
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// This is the same as [`read_exact_bytes`](Self::read_exact_bytes) but implemented as a separate
    /// method to allow some implementations to optimize it to cost fewer instructions
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    /// Read bytes into `buf` returning how many bytes you have read or an error if one occurred
    ///
    /// This doesn't guarantee that buf will be filled with bytes for such a guarantee see
    /// [`read_exact_bytes`](Self::read_exact_bytes)
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Reads data into provided buffer but does not advance read position.
    ///
    /// Returns the number of bytes actually copied, which is less than
    /// `buf.len()` when the stream ends early.
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Fill `buf` without advancing the read position or error out
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Seek into a new position from the buffer
    ///
    /// This is similar to the [seek](std::io::Seek::seek) function in the [Seek](std::io::Seek) trait
    /// but implemented to work for no-std environments
    fn byte_seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError>;

    /// Report whether we are at the end of a stream.
    fn is_eof(&mut self) -> Result<bool, ByteIoError>;

    /// Return the current position of the inner cursor.
    fn byte_position(&mut self) -> Result<u64, ByteIoError>;

    /// Read all bytes remaining in this input to `sink` until we hit eof
    ///
    /// # Returns
    /// - `Ok(usize)` The actual number of bytes added to the sink
    /// - `Err()` An error that occurred when reading bytes
    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError>;
}

impl<T: ByteReaderTrait> ByteReaderTrait for &mut T {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        (**self).read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        (**self).read_const_bytes(buf)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        (**self).read_bytes(buf)
    }

    #[inline(always)]
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        (**self).peek_bytes(buf)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        (**self).peek_exact_bytes(buf)
    }

    #[inline(always)]
    fn byte_seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError> {
        (**self).byte_seek(from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        (**self).is_eof()
    }

    #[inline(always)]
    fn byte_position(&mut self) -> Result<u64, ByteIoError> {
        (**self).byte_position()
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        (**self).read_remaining(sink)
    }
}
