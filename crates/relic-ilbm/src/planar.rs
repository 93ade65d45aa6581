/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Planar to chunky conversion
//!
//! A decoded row is stored as `planes` runs of `bytes_per_row` bytes.
//! Bit `7 - (x % 8)` of byte `x / 8` in plane `p` is bit `p` of pixel `x`.

use relic_core::palette::{Palette, PaletteEntry};

/// The rows of every plane of one image row
pub(crate) struct PlaneRows<'a> {
    data:          &'a [u8],
    bytes_per_row: usize
}

impl<'a> PlaneRows<'a> {
    pub fn new(data: &'a [u8], bytes_per_row: usize) -> PlaneRows<'a> {
        PlaneRows {
            data,
            bytes_per_row
        }
    }

    /// Gather the bits of pixel `x` across the first `planes` planes
    #[inline]
    pub fn value(&self, x: usize, planes: usize) -> u32 {
        let byte = x / 8;
        let shift = 7 - (x % 8);
        let mut value = 0;

        for plane in 0..planes {
            let offset = plane * self.bytes_per_row + byte;

            if let Some(bits) = self.data.get(offset) {
                value |= u32::from((bits >> shift) & 1) << plane;
            }
        }
        value
    }
}

/// One palette index per pixel from `planes` bitplanes
///
/// Bits from planes past the eighth do not fit a byte and are dropped.
pub(crate) fn deinterleave(rows: &PlaneRows, planes: usize, out: &mut [u8]) {
    for (x, pixel) in out.iter_mut().enumerate() {
        *pixel = (rows.value(x, planes) & 0xFF) as u8;
    }
}

/// 24 bitplanes, eight each of red, green and blue, to RGB bytes
pub(crate) fn true_color(rows: &PlaneRows, out: &mut [u8]) {
    for (x, pixel) in out.chunks_exact_mut(3).enumerate() {
        let value = rows.value(x, 24);

        pixel[0] = (value & 0xFF) as u8;
        pixel[1] = ((value >> 8) & 0xFF) as u8;
        pixel[2] = ((value >> 16) & 0xFF) as u8;
    }
}

/// Hold-And-Modify decoding of one row to RGB bytes
///
/// The top two bits of a pixel value select the operation, the rest
/// is the payload. `0` loads palette entry `payload`, `1` replaces blue,
/// `2` red and `3` green with the payload moved to the channel's top bits.
/// The held color starts black on every row.
pub(crate) fn hold_and_modify(rows: &PlaneRows, planes: usize, palette: &Palette, out: &mut [u8]) {
    let payload_bits = planes - 2;
    let payload_mask = (1_u32 << payload_bits) - 1;
    let shift = 10 - planes;

    let mut held = PaletteEntry::default();

    for (x, pixel) in out.chunks_exact_mut(3).enumerate() {
        let value = rows.value(x, planes);
        let payload = value & payload_mask;
        let channel = ((payload << shift) & 0xFF) as u8;

        match value >> payload_bits {
            0 => held = palette.get(payload as usize).unwrap_or_default(),
            1 => held.blue = channel,
            2 => held.red = channel,
            _ => held.green = channel
        }
        pixel[0] = held.red;
        pixel[1] = held.green;
        pixel[2] = held.blue;
    }
}
