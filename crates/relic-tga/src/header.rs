/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relic_core::bytestream::{ByteReader, ByteReaderTrait};

use crate::errors::TgaDecodeErrors;

/// Size of the fixed header that starts every file
pub const TGA_HEADER_SIZE: usize = 18;

/// Rows are stored top to bottom
pub const DESCRIPTOR_UPPER_ORIGIN: u8 = 0x20;
/// Rows are stored right to left
pub const DESCRIPTOR_RIGHT_ORIGIN: u8 = 0x10;
/// Two bits selecting two or four way interleaving
pub const DESCRIPTOR_INTERLEAVE: u8 = 0xC0;

/// The image type byte
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TgaImageType {
    NoImage,
    Indexed,
    TrueColor,
    Greyscale,
    RleIndexed,
    RleTrueColor,
    RleGreyscale,
    /// Huffman and delta compressed, types 32 and 33
    Huffman(u8)
}

impl TgaImageType {
    pub const fn from_u8(kind: u8) -> Option<TgaImageType> {
        let image_type = match kind {
            0 => Self::NoImage,
            1 => Self::Indexed,
            2 => Self::TrueColor,
            3 => Self::Greyscale,
            9 => Self::RleIndexed,
            10 => Self::RleTrueColor,
            11 => Self::RleGreyscale,
            32 | 33 => Self::Huffman(kind),
            _ => return None
        };
        Some(image_type)
    }

    pub const fn is_rle(self) -> bool {
        matches!(
            self,
            Self::RleIndexed | Self::RleTrueColor | Self::RleGreyscale
        )
    }

    /// Color mapped, greyscale not included
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed | Self::RleIndexed)
    }

    pub const fn is_greyscale(self) -> bool {
        matches!(self, Self::Greyscale | Self::RleGreyscale)
    }

    pub const fn is_true_color(self) -> bool {
        matches!(self, Self::TrueColor | Self::RleTrueColor)
    }

    /// Whether this decoder can read pixels of this type
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::NoImage | Self::Huffman(_))
    }
}

/// The fixed 18 byte file header, all words little endian
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TgaHeader {
    /// Length of the image id field following the header
    pub id_length:        u8,
    pub color_map_type:   u8,
    pub image_type:       u8,
    /// First entry index of the color map, not used for decoding
    pub color_map_start:  u16,
    pub color_map_length: u16,
    /// Bits per color map entry
    pub color_map_depth:  u8,
    pub x_origin:         u16,
    pub y_origin:         u16,
    pub width:            u16,
    pub height:           u16,
    pub pixel_depth:      u8,
    pub descriptor:       u8
}

impl TgaHeader {
    pub fn from_bytes(bytes: [u8; TGA_HEADER_SIZE]) -> TgaHeader {
        let word = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        TgaHeader {
            id_length:        bytes[0],
            color_map_type:   bytes[1],
            image_type:       bytes[2],
            color_map_start:  word(3),
            color_map_length: word(5),
            color_map_depth:  bytes[7],
            x_origin:         word(8),
            y_origin:         word(10),
            width:            word(12),
            height:           word(14),
            pixel_depth:      bytes[16],
            descriptor:       bytes[17]
        }
    }

    pub(crate) fn read<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>
    ) -> Result<TgaHeader, TgaDecodeErrors> {
        let bytes = stream.read_fixed_bytes_or_error::<TGA_HEADER_SIZE>()?;

        Ok(TgaHeader::from_bytes(bytes))
    }

    pub const fn kind(&self) -> Option<TgaImageType> {
        TgaImageType::from_u8(self.image_type)
    }

    pub const fn has_color_map(&self) -> bool {
        self.color_map_type == 1
    }

    pub const fn is_upper_origin(&self) -> bool {
        self.descriptor & DESCRIPTOR_UPPER_ORIGIN != 0
    }

    pub const fn is_right_origin(&self) -> bool {
        self.descriptor & DESCRIPTOR_RIGHT_ORIGIN != 0
    }

    pub const fn is_interleaved(&self) -> bool {
        self.descriptor & DESCRIPTOR_INTERLEAVE != 0
    }

    /// Bytes taken by one stored color map entry
    pub const fn color_map_entry_size(&self) -> usize {
        (self.color_map_depth as usize + 7) >> 3
    }

    /// Bytes taken by the whole stored color map
    ///
    /// Zero if the header declares no color map
    pub const fn color_map_size(&self) -> usize {
        if !self.has_color_map() {
            return 0;
        }
        self.color_map_length as usize * self.color_map_entry_size()
    }
}
