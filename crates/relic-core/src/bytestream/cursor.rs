/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec::Vec;

use crate::bytestream::{ByteIoError, ByteReaderTrait, ByteSeek};

/// An in memory byte source that works without `std`
///
/// Seeking past the end is allowed, reads from there report
/// [`ByteIoError::NotEnoughBytes`].
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }

    /// Current offset from the start of the buffer
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes between the current position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }

    /// Return the wrapped buffer
    pub fn into_inner(self) -> T {
        self.stream
    }

    fn available(&self) -> &[u8] {
        let bytes = self.stream.as_ref();
        let start = core::cmp::min(self.position, bytes.len());
        &bytes[start..]
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let available = self.available();

        match available.get(..buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position += buf.len();
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBytes(buf.len(), available.len()))
        }
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let read = self.peek_bytes(buf)?;
        self.position += read;
        Ok(read)
    }

    #[inline(always)]
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let available = self.available();
        let read = core::cmp::min(available.len(), buf.len());

        buf[..read].copy_from_slice(&available[..read]);

        Ok(read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let read = self.peek_bytes(buf)?;

        if read != buf.len() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), read));
        }
        Ok(())
    }

    fn byte_seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError> {
        let new_position = match from {
            ByteSeek::Start(position) => usize::try_from(position)?,
            ByteSeek::End(offset) => {
                let end = i64::try_from(self.stream.as_ref().len())?;
                let target = end
                    .checked_add(offset)
                    .ok_or(ByteIoError::SeekError("Seek offset overflowed"))?;
                usize::try_from(target)
                    .map_err(|_| ByteIoError::SeekError("Cannot seek before start of stream"))?
            }
            ByteSeek::Current(offset) => {
                let current = i64::try_from(self.position)?;
                let target = current
                    .checked_add(offset)
                    .ok_or(ByteIoError::SeekError("Seek offset overflowed"))?;
                usize::try_from(target)
                    .map_err(|_| ByteIoError::SeekError("Cannot seek before start of stream"))?
            }
        };
        self.position = new_position;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    #[inline(always)]
    fn byte_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        let available = self.available();
        let read = available.len();

        sink.extend_from_slice(available);
        self.position += read;

        Ok(read)
    }
}
