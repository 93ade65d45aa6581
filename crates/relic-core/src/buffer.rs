/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The canonical decode output
//!
//! Every decoder produces a [`PixelBuffer`], a top-down row major pixel
//! store together with the metadata needed to interpret it.
//!
//! A buffer is built in two steps, first a [`PixelLayout`] validates the
//! dimensions and hands out a zeroed store, the decoder fills it, then
//! [`PixelBuffer::new`] checks the invariants and takes ownership.
use alloc::vec::Vec;

use crate::errors::LayoutErrors;
use crate::options::{DecoderOptions, MAX_DIMENSIONS};
use crate::palette::Palette;

/// Pixel formats a decoder can produce
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    /// One byte per pixel, an index into the buffer's palette
    Indexed8,
    /// Three bytes per pixel, red then green then blue
    Rgb24,
    /// Three bytes per pixel, blue then green then red
    Bgr24,
    /// Two bytes per pixel, five bits per channel with the top bit unused
    ///
    /// Byte order within a pixel follows [`DecoderOptions::get_byte_endian`]
    Xrgb1555,
    /// Four bytes per pixel, blue, green, red then alpha
    Bgra32
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Xrgb1555 => 2,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 3,
            PixelFormat::Bgra32 => 4
        }
    }

    /// Whether pixels of this format are palette indices
    pub const fn has_palette(self) -> bool {
        matches!(self, PixelFormat::Indexed8)
    }

    /// Largest pixel value of this format, and hence the largest color key
    pub const fn max_value(self) -> u32 {
        match self {
            PixelFormat::Indexed8 => 0xFF,
            PixelFormat::Xrgb1555 => 0x7FFF,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 0x00FF_FFFF,
            PixelFormat::Bgra32 => u32::MAX
        }
    }
}

/// A pixel value treated as fully transparent
///
/// For indexed images this is a palette index
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ColorKey(pub u32);

/// Cursor hotspot, offset of the click point from the top left corner
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Hotspot {
    pub x: u16,
    pub y: u16
}

/// Validated dimensions and row pitch of an image about to be decoded
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PixelLayout {
    width:  usize,
    height: usize,
    stride: usize,
    format: PixelFormat
}

impl PixelLayout {
    /// Validate dimensions and compute the row stride
    ///
    /// Rows are padded to a multiple of four bytes.
    pub fn new(
        width: usize, height: usize, format: PixelFormat, options: &DecoderOptions
    ) -> Result<PixelLayout, LayoutErrors> {
        if width == 0 || height == 0 {
            return Err(LayoutErrors::ZeroDimensions);
        }
        let max_width = options.get_max_width().min(MAX_DIMENSIONS);
        let max_height = options.get_max_height().min(MAX_DIMENSIONS);

        if width > max_width {
            return Err(LayoutErrors::TooLargeWidth(width, max_width));
        }
        if height > max_height {
            return Err(LayoutErrors::TooLargeHeight(height, max_height));
        }
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .and_then(|x| x.checked_add(3))
            .map(|x| x & !3)
            .ok_or(LayoutErrors::SizeOverflow)?;

        // make sure the full store size is representable
        stride
            .checked_mul(height)
            .ok_or(LayoutErrors::SizeOverflow)?;

        Ok(PixelLayout {
            width,
            height,
            stride,
            format
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub const fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes of pixel data in a row, excluding padding
    pub const fn row_bytes(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    /// Total size of the pixel store
    pub const fn size(&self) -> usize {
        self.stride * self.height
    }

    /// Allocate a zeroed pixel store of `stride * height` bytes
    ///
    /// Allocation failure is reported instead of aborting
    pub fn allocate(&self) -> Result<Vec<u8>, LayoutErrors> {
        let size = self.size();
        let mut pixels = Vec::new();

        pixels
            .try_reserve_exact(size)
            .map_err(|_| LayoutErrors::AllocationFailed(size))?;
        pixels.resize(size, 0);

        Ok(pixels)
    }
}

/// A decoded image
///
/// Rows are stored top to bottom, each `stride` bytes apart.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    layout:    PixelLayout,
    pixels:    Vec<u8>,
    palette:   Option<Palette>,
    color_key: Option<ColorKey>,
    hotspot:   Option<Hotspot>
}

impl PixelBuffer {
    /// Take ownership of a filled pixel store
    ///
    /// # Errors
    /// - The store length is not `stride * height`
    /// - A palette is given for a non indexed format or missing for an indexed one
    pub fn new(
        layout: PixelLayout, pixels: Vec<u8>, palette: Option<Palette>
    ) -> Result<PixelBuffer, LayoutErrors> {
        if pixels.len() != layout.size() {
            return Err(LayoutErrors::LengthMismatch(layout.size(), pixels.len()));
        }
        if layout.format.has_palette() != palette.is_some() {
            return Err(LayoutErrors::PaletteMismatch);
        }
        Ok(PixelBuffer {
            layout,
            pixels,
            palette,
            color_key: None,
            hotspot: None
        })
    }

    /// Attach a transparent color
    ///
    /// # Errors
    /// The key is larger than the format's maximum pixel value, or for
    /// indexed images, not a valid palette index.
    pub fn with_color_key(mut self, key: ColorKey) -> Result<PixelBuffer, LayoutErrors> {
        let max = match &self.palette {
            Some(palette) => (palette.len() as u32).saturating_sub(1),
            None => self.layout.format.max_value()
        };
        if key.0 > max || (self.palette.as_ref().is_some_and(|p| p.is_empty())) {
            return Err(LayoutErrors::ColorKeyOutOfRange(key.0, max));
        }
        self.color_key = Some(key);
        Ok(self)
    }

    /// Attach a cursor hotspot
    #[must_use]
    pub fn with_hotspot(mut self, hotspot: Hotspot) -> PixelBuffer {
        self.hotspot = Some(hotspot);
        self
    }

    pub const fn width(&self) -> usize {
        self.layout.width
    }

    pub const fn height(&self) -> usize {
        self.layout.height
    }

    pub const fn stride(&self) -> usize {
        self.layout.stride
    }

    pub const fn pixel_format(&self) -> PixelFormat {
        self.layout.format
    }

    pub const fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel bytes of row `y` without padding, or `None` past the last row
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.layout.height {
            return None;
        }
        let start = y * self.layout.stride;
        self.pixels.get(start..start + self.layout.row_bytes())
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub const fn color_key(&self) -> Option<ColorKey> {
        self.color_key
    }

    pub const fn hotspot(&self) -> Option<Hotspot> {
        self.hotspot
    }

    /// Return the pixel store, dropping the metadata
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
