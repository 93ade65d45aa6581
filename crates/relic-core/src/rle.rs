/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run length transforms
//!
//! Two schemes live here
//!
//! - [`decode_byte_run`]: the IFF byte-run scheme (a PackBits variant) which
//!   always works on one row at a time.
//! - [`PacketRle`]: the Targa packet scheme, where a packet may continue
//!   into the next row, so the decoder carries its state between rows.
use crate::bytestream::{ByteReader, ByteReaderTrait};
use crate::errors::RleErrors;

/// Expand byte-run compressed data until `out` is full
///
/// A control byte `c` below `0x80` copies the next `c + 1` bytes,
/// otherwise the next byte is repeated `(c ^ 0xFF) + 2` times.
///
/// # Errors
/// - [`RleErrors::Overrun`] if a run is longer than the space left in `out`
/// - [`RleErrors::IoErrors`] if the stream ends early
pub fn decode_byte_run<T: ByteReaderTrait>(
    reader: &mut ByteReader<T>, out: &mut [u8]
) -> Result<(), RleErrors> {
    let mut position = 0;

    while position < out.len() {
        let control = reader.get_u8_err()?;
        let room = out.len() - position;

        if control & 0x80 != 0 {
            let count = usize::from(control ^ 0xFF) + 2;

            if count > room {
                return Err(RleErrors::Overrun(count, room));
            }
            let value = reader.get_u8_err()?;
            out[position..position + count].fill(value);
            position += count;
        } else {
            let count = usize::from(control) + 1;

            if count > room {
                return Err(RleErrors::Overrun(count, room));
            }
            reader.read_exact_bytes(&mut out[position..position + count])?;
            position += count;
        }
    }
    Ok(())
}

/// Stateful Targa packet decoder
///
/// A packet header byte with the top bit set is a run, the next pixel is
/// repeated `(header & 0x7F) + 1` times. Otherwise it is a raw packet of
/// `(header & 0x7F) + 1` literal pixels.
///
/// Counts left over when a row fills up are kept for the next row.
#[derive(Copy, Clone, Debug, Default)]
pub struct PacketRle {
    raw_left:    usize,
    repeat_left: usize,
    value:       [u8; 4]
}

impl PacketRle {
    pub const fn new() -> PacketRle {
        PacketRle {
            raw_left:    0,
            repeat_left: 0,
            value:       [0; 4]
        }
    }

    /// Whether a packet is still partially consumed
    pub const fn is_pending(&self) -> bool {
        self.raw_left != 0 || self.repeat_left != 0
    }

    /// Fill `row` with pixels of `bytes_per_pixel` bytes each
    ///
    /// `bytes_per_pixel` must be in `1..=4` and divide `row.len()`
    pub fn fill_row<T: ByteReaderTrait>(
        &mut self, reader: &mut ByteReader<T>, row: &mut [u8], bytes_per_pixel: usize
    ) -> Result<(), RleErrors> {
        let bpp = bytes_per_pixel.clamp(1, 4);
        let mut position = 0;

        while position + bpp <= row.len() {
            let room = (row.len() - position) / bpp;

            if self.repeat_left > 0 {
                let count = self.repeat_left.min(room);

                for pixel in row[position..position + count * bpp].chunks_exact_mut(bpp) {
                    pixel.copy_from_slice(&self.value[..bpp]);
                }
                self.repeat_left -= count;
                position += count * bpp;
                continue;
            }
            if self.raw_left > 0 {
                let count = self.raw_left.min(room);

                reader.read_exact_bytes(&mut row[position..position + count * bpp])?;
                self.raw_left -= count;
                position += count * bpp;
                continue;
            }
            let header = reader.get_u8_err()?;
            let count = usize::from(header & 0x7F) + 1;

            if header & 0x80 != 0 {
                reader.read_exact_bytes(&mut self.value[..bpp])?;
                self.repeat_left = count;
            } else {
                self.raw_left = count;
            }
        }
        Ok(())
    }
}
