/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relic_core::buffer::Hotspot;

/// Only compression the decoder handles
pub(crate) const BI_RGB: u32 = 0;

/// Size of the info header used by icons and plain v3 bitmaps
pub(crate) const BITMAPINFOHEADER_SIZE: u32 = 40;

/// Largest width or height accepted from a DIB header
pub(crate) const MAX_DIB_DIMENSION: i32 = 0x00FF_FFFF;

pub(crate) const ICON_TYPE_ICO: u16 = 1;
pub(crate) const ICON_TYPE_CUR: u16 = 2;

/// The container a DIB was found in
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContainerKind {
    /// A plain `.bmp` file starting with `BM`
    Bitmap,
    /// An icon directory of type 1
    Icon,
    /// A cursor directory of type 2
    Cursor
}

impl ContainerKind {
    pub(crate) const fn from_icon_type(icon_type: u16) -> Option<ContainerKind> {
        match icon_type {
            ICON_TYPE_ICO => Some(ContainerKind::Icon),
            ICON_TYPE_CUR => Some(ContainerKind::Cursor),
            _ => None
        }
    }
}

/// One entry of an icon or cursor directory
///
/// The single byte dimension and color fields are stored expanded,
/// so a stored `0` reads as `256`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IconDirEntry {
    pub width:        u16,
    pub height:       u16,
    pub color_count:  u16,
    pub reserved:     u8,
    /// Color planes for icons, hotspot x for cursors
    pub planes:       u16,
    /// Bits per pixel for icons, hotspot y for cursors
    pub bit_count:    u16,
    pub bytes_in_res: u32,
    /// Offset of the DIB from the start of the directory
    pub image_offset: u32
}

impl IconDirEntry {
    pub(crate) fn from_bytes(bytes: [u8; 16]) -> IconDirEntry {
        let expand = |x: u8| if x == 0 { 256 } else { u16::from(x) };

        IconDirEntry {
            width:        expand(bytes[0]),
            height:       expand(bytes[1]),
            color_count:  expand(bytes[2]),
            reserved:     bytes[3],
            planes:       u16::from_le_bytes([bytes[4], bytes[5]]),
            bit_count:    u16::from_le_bytes([bytes[6], bytes[7]]),
            bytes_in_res: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            image_offset: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]])
        }
    }

    /// The hotspot fields of a cursor entry
    pub const fn hotspot(&self) -> Hotspot {
        Hotspot {
            x: self.planes,
            y: self.bit_count
        }
    }
}

/// Index of the entry with the most colors, the first one wins a tie
pub(crate) fn best_entry(entries: &[IconDirEntry]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (i, entry) in entries.iter().enumerate() {
        match best {
            Some(b) if entries[b].color_count >= entry.color_count => {}
            _ => best = Some(i)
        }
    }
    best
}
