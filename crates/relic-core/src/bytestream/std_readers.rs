/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io;
use std::io::{BufRead, BufReader, Read, Seek};

use crate::bytestream::{ByteIoError, ByteReaderTrait, ByteSeek};

impl<T> ByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.position();

        self.read_exact(buf).map_err(|e| {
            // keep the cursor where it was, read_exact moves it to the end on failure
            self.set_position(start);
            ByteIoError::from(e)
        })
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let start = self.position();
        let bytes_read = self.read_bytes(buf)?;
        self.set_position(start);

        Ok(bytes_read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.position();
        self.read_exact_bytes(buf)?;
        self.set_position(start);
        Ok(())
    }

    #[inline(always)]
    fn byte_seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    fn byte_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position())
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}

impl<T: io::Read + io::Seek> ByteReaderTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    fn peek_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        // first read bytes to the buffer
        let bytes_read = self.read_bytes(buf)?;
        let converted = -i64::try_from(bytes_read).map_err(ByteIoError::from)?;
        self.seek_relative(converted).map_err(ByteIoError::from)?;

        Ok(bytes_read)
    }

    #[inline]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        // first read bytes to the buffer
        self.read_exact_bytes(buf)?;
        let converted = -i64::try_from(buf.len()).map_err(ByteIoError::from)?;
        self.seek_relative(converted).map_err(ByteIoError::from)?;

        Ok(())
    }

    fn byte_seek(&mut self, from: ByteSeek) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(ByteIoError::from)
    }

    fn byte_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}
