/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Device independent bitmap reading
//!
//! Shared by plain bitmaps and the images inside icon directories. The
//! info header, color table and pixel rows are identical in both, icons
//! append a one bit AND mask after the color rows.
use alloc::vec;

use relic_core::buffer::PixelLayout;
use relic_core::bytestream::{ByteReader, ByteReaderTrait};
use relic_core::log::trace;
use relic_core::palette::{Palette, PaletteEntry, MAX_PALETTE_ENTRIES};

use crate::common::BI_RGB;
use crate::utils::{expand_bits_to_byte, padded_row_size};
use crate::BmpDecodeErrors;

/// The fields of `BITMAPINFOHEADER`, the first 40 bytes of every
/// info header version we read
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct InfoHeader {
    pub size:        u32,
    pub width:       i32,
    pub height:      i32,
    pub planes:      u16,
    pub bit_count:   u16,
    pub compression: u32,
    pub clr_used:    u32
}

impl InfoHeader {
    /// Read the 40 byte core of the info header, leaving the stream
    /// right after it
    pub fn read<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>
    ) -> Result<InfoHeader, BmpDecodeErrors> {
        let size = stream.get_u32_le_err()?;
        let width = stream.get_i32_le_err()?;
        let height = stream.get_i32_le_err()?;
        let planes = stream.get_u16_le_err()?;
        let bit_count = stream.get_u16_le_err()?;
        let compression = stream.get_u32_le_err()?;
        // image size, x and y resolution
        stream.skip(12)?;
        let clr_used = stream.get_u32_le_err()?;
        // important colors
        stream.skip(4)?;

        trace!("Info header size: {}", size);
        trace!("Width: {} Height: {}", width, height);
        trace!("Bit count: {}", bit_count);
        trace!("Colors used: {}", clr_used);

        Ok(InfoHeader {
            size,
            width,
            height,
            planes,
            bit_count,
            compression,
            clr_used
        })
    }

    /// Check compression and depth
    pub fn validate_format(&self) -> Result<(), BmpDecodeErrors> {
        if self.compression != BI_RGB {
            return Err(BmpDecodeErrors::UnsupportedCompression(self.compression));
        }
        match self.bit_count {
            1 | 4 | 8 | 24 | 32 => Ok(()),
            depth => Err(BmpDecodeErrors::UnsupportedDepth(depth))
        }
    }

    pub const fn is_indexed(&self) -> bool {
        self.bit_count <= 8
    }

    /// Palette size, `clr_used` or `2^bit_count` when that is zero
    pub fn palette_len(&self) -> u32 {
        if self.clr_used == 0 {
            1 << self.bit_count
        } else {
            self.clr_used
        }
    }
}

/// The color table of an indexed DIB
///
/// Entries carry the fourth byte as alpha, a stored zero
/// is read as fully opaque.
pub(crate) struct ColorTable {
    palette: Palette,
    alpha:   [u8; MAX_PALETTE_ENTRIES]
}

impl ColorTable {
    /// Read `count` BGRX entries
    pub fn read<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>, count: usize
    ) -> Result<ColorTable, BmpDecodeErrors> {
        if count > MAX_PALETTE_ENTRIES {
            return Err(BmpDecodeErrors::TooManyColors(count as u32));
        }
        let mut palette = Palette::new();
        let mut alpha = [0xFF; MAX_PALETTE_ENTRIES];

        for slot in alpha.iter_mut().take(count) {
            let [b, g, r, a] = stream.read_fixed_bytes_or_error::<4>()?;
            palette.push(PaletteEntry::new(r, g, b))?;

            if a != 0 {
                *slot = a;
            }
        }
        Ok(ColorTable { palette, alpha })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// BGRA value of `index`, indices past the table are opaque black
    fn bgra(&self, index: u8) -> [u8; 4] {
        match self.palette.get(usize::from(index)) {
            Some(entry) => [
                entry.blue,
                entry.green,
                entry.red,
                self.alpha[usize::from(index)]
            ],
            None => [0, 0, 0, 0xFF]
        }
    }
}

/// How the alpha byte of 32 bit rows is treated
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) enum AlphaMode {
    /// Copy the stored value
    Keep,
    /// Force every pixel opaque
    Opaque
}

/// Read the color rows of a DIB into a `Bgra32` pixel store
///
/// The stream must be positioned at the first stored row.
/// When `bottom_up` is set the first stored row is the last
/// output row.
pub(crate) fn read_color_rows<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, header: &InfoHeader, colors: Option<&ColorTable>,
    layout: &PixelLayout, pixels: &mut [u8], bottom_up: bool, alpha: AlphaMode
) -> Result<(), BmpDecodeErrors> {
    let width = layout.width();
    let height = layout.height();
    let stride = layout.stride();
    let depth = usize::from(header.bit_count);

    let src_size = padded_row_size(width, depth)
        .ok_or(BmpDecodeErrors::GenericStatic("Row size overflowed"))?;

    let mut src_row = vec![0_u8; src_size];
    let mut indices = vec![0_u8; if header.is_indexed() { width } else { 0 }];

    for y in 0..height {
        stream.read_exact_bytes(&mut src_row)?;

        let out_y = if bottom_up { height - 1 - y } else { y };
        let start = out_y * stride;
        let out_row = pixels
            .get_mut(start..start + width * 4)
            .ok_or(BmpDecodeErrors::GenericStatic("Row outside of pixel store"))?;

        match depth {
            1 | 4 | 8 => {
                let table = colors.ok_or(BmpDecodeErrors::GenericStatic(
                    "Indexed bitmap without a color table"
                ))?;
                expand_bits_to_byte(depth, &src_row, &mut indices);

                for (pixel, index) in out_row.chunks_exact_mut(4).zip(indices.iter()) {
                    pixel.copy_from_slice(&table.bgra(*index));
                }
            }
            24 => {
                for (pixel, src) in out_row.chunks_exact_mut(4).zip(src_row.chunks_exact(3)) {
                    pixel[0..3].copy_from_slice(src);
                    pixel[3] = 0xFF;
                }
            }
            _ => {
                out_row.copy_from_slice(&src_row[..width * 4]);

                if alpha == AlphaMode::Opaque {
                    out_row.chunks_exact_mut(4).for_each(|x| x[3] = 0xFF);
                }
            }
        }
    }
    Ok(())
}

/// Read the one bit AND mask following the color rows of an icon
///
/// A set bit makes the whole pixel zero, transparent black.
pub(crate) fn apply_and_mask<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, layout: &PixelLayout, pixels: &mut [u8]
) -> Result<(), BmpDecodeErrors> {
    let width = layout.width();
    let height = layout.height();
    let stride = layout.stride();

    let src_size = padded_row_size(width, 1)
        .ok_or(BmpDecodeErrors::GenericStatic("Row size overflowed"))?;

    let mut src_row = vec![0_u8; src_size];
    let mut mask = vec![0_u8; width];

    for y in 0..height {
        stream.read_exact_bytes(&mut src_row)?;
        expand_bits_to_byte(1, &src_row, &mut mask);

        let start = (height - 1 - y) * stride;
        let out_row = pixels
            .get_mut(start..start + width * 4)
            .ok_or(BmpDecodeErrors::GenericStatic("Row outside of pixel store"))?;

        for (pixel, bit) in out_row.chunks_exact_mut(4).zip(mask.iter()) {
            if *bit != 0 {
                pixel.fill(0);
            }
        }
    }
    Ok(())
}
