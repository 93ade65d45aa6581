/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relic_core::bytestream::{ByteReader, ByteReaderTrait};
use relic_core::log::trace;

use crate::IlbmDecodeErrors;

pub(crate) const FORM: [u8; 4] = *b"FORM";
pub(crate) const ILBM: [u8; 4] = *b"ILBM";
pub(crate) const PBM: [u8; 4] = *b"PBM ";
pub(crate) const BMHD: [u8; 4] = *b"BMHD";
pub(crate) const CMAP: [u8; 4] = *b"CMAP";
pub(crate) const CAMG: [u8; 4] = *b"CAMG";
pub(crate) const BODY: [u8; 4] = *b"BODY";

/// Size of the `BMHD` payload
pub(crate) const BMHD_SIZE: u32 = 20;

/// The two raster forms
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FormKind {
    /// Interleaved bitplanes, one row of every plane after another
    Ilbm,
    /// Packed bitmap, one byte per pixel
    Pbm
}

impl FormKind {
    pub(crate) fn from_tag(tag: [u8; 4]) -> Option<FormKind> {
        match tag {
            ILBM => Some(FormKind::Ilbm),
            PBM => Some(FormKind::Pbm),
            _ => None
        }
    }
}

/// The `BMHD` chunk
///
/// All multi byte fields are big endian on disk
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BitmapHeader {
    pub width:             u16,
    pub height:            u16,
    pub x:                 i16,
    pub y:                 i16,
    pub planes:            u8,
    /// Bit 0 is a stencil plane, bit 1 a transparent color
    pub masking:           u8,
    pub compression:       u8,
    pub pad:               u8,
    pub transparent_color: u16,
    pub x_aspect:          u8,
    pub y_aspect:          u8,
    pub page_width:        i16,
    pub page_height:       i16
}

impl BitmapHeader {
    pub(crate) fn read<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>
    ) -> Result<BitmapHeader, IlbmDecodeErrors> {
        let header = BitmapHeader {
            width:             stream.get_u16_be_err()?,
            height:            stream.get_u16_be_err()?,
            x:                 stream.get_i16_be_err()?,
            y:                 stream.get_i16_be_err()?,
            planes:            stream.get_u8_err()?,
            masking:           stream.get_u8_err()?,
            compression:       stream.get_u8_err()?,
            pad:               stream.get_u8_err()?,
            transparent_color: stream.get_u16_be_err()?,
            x_aspect:          stream.get_u8_err()?,
            y_aspect:          stream.get_u8_err()?,
            page_width:        stream.get_i16_be_err()?,
            page_height:       stream.get_i16_be_err()?
        };
        trace!("Width: {} Height: {}", header.width, header.height);
        trace!("Planes: {}", header.planes);
        trace!("Masking: {}", header.masking);
        trace!("Compression: {}", header.compression);

        Ok(header)
    }

    /// Whether an extra stencil plane follows the color planes
    pub const fn has_stencil(&self) -> bool {
        self.masking & 1 != 0
    }

    /// Whether `transparent_color` is a color key
    pub const fn has_color_key(&self) -> bool {
        self.masking & 2 != 0
    }

    /// Output width, the header width rounded up to 16 pixels
    pub const fn padded_width(&self) -> usize {
        (self.width as usize + 15) & !15
    }
}

/// The Amiga view mode from the `CAMG` chunk
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewMode(pub u32);

impl ViewMode {
    pub const HAM: u32 = 0x0800;
    pub const EXTRA_HALF_BRITE: u32 = 0x0080;

    /// Hold-And-Modify
    pub const fn is_ham(&self) -> bool {
        self.0 & Self::HAM != 0
    }

    /// Extra-Half-Bright
    pub const fn is_ehb(&self) -> bool {
        self.0 & Self::EXTRA_HALF_BRITE != 0
    }
}
