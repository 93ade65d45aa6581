/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// Two containers carry the same device independent bitmap.
//
// Plain bitmaps
// - A 14 byte file header, the magic "BM", file size, two reserved words
//   and the offset of the pixel data from the start of the file.
// - An info header, 40 bytes for v3, 108 for v4 and 124 for v5. The later
//   versions only append fields (masks, color space) to the v3 layout.
// - The color table for depths of 8 and lower, then the pixel rows at the
//   data offset. A negative height means rows are stored top-down.
//
// Icons and cursors
// - A 6 byte directory header, a reserved zero word, the type (1 icon,
//   2 cursor) and the number of images.
// - 16 bytes per image, width, height and color count as bytes where 0
//   means 256, two words that are planes and bit count for icons but the
//   hotspot for cursors, the image size and its offset.
// - Each image is a v3 DIB without a file header. Its stored height is
//   twice the real height, the color rows are followed by a one bit AND
//   mask of the same dimensions.

use alloc::vec::Vec;

use relic_core::buffer::{Hotspot, PixelBuffer, PixelFormat, PixelLayout};
use relic_core::bytestream::{ByteReader, ByteReaderTrait};
use relic_core::log::{trace, warn};
use relic_core::options::DecoderOptions;
use relic_core::palette::Palette;

use crate::common::{
    best_entry, ContainerKind, IconDirEntry, BITMAPINFOHEADER_SIZE, ICON_TYPE_CUR, ICON_TYPE_ICO,
    MAX_DIB_DIMENSION
};
use crate::dib::{apply_and_mask, read_color_rows, AlphaMode, ColorTable, InfoHeader};
use crate::utils::padded_row_size;
use crate::BmpDecodeErrors;

/// Probe some bytes to see
/// if they consist of a plain BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    bytes.starts_with(b"BM")
}

fn probe_icon_type(bytes: &[u8], icon_type: u16) -> bool {
    if let Some(header) = bytes.get(0..6) {
        let reserved = u16::from_le_bytes([header[0], header[1]]);
        let kind = u16::from_le_bytes([header[2], header[3]]);
        let count = u16::from_le_bytes([header[4], header[5]]);

        return reserved == 0 && kind == icon_type && count != 0;
    }
    false
}

/// Probe some bytes to see
/// if they start with an icon directory
pub fn probe_ico(bytes: &[u8]) -> bool {
    probe_icon_type(bytes, ICON_TYPE_ICO)
}

/// Probe some bytes to see
/// if they start with a cursor directory
pub fn probe_cur(bytes: &[u8]) -> bool {
    probe_icon_type(bytes, ICON_TYPE_CUR)
}

/// A BMP, ICO and CUR decoder.
///
/// # Usage
///
/// ## Extracting image metadata
/// ```no_run
/// use relic_bmp::BmpDecoder;
/// use relic_core::bytestream::ByteCursor;
///
/// fn main() -> Result<(), relic_bmp::BmpDecodeErrors> {
///     let mut decoder = BmpDecoder::new(ByteCursor::new(b"BM"));
///     decoder.decode_headers()?;
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     Ok(())
/// }
/// ```
///
/// ## Getting the pixels
/// ```no_run
/// use relic_bmp::BmpDecoder;
/// use relic_core::bytestream::ByteCursor;
///
/// fn main() -> Result<(), relic_bmp::BmpDecodeErrors> {
///     let mut decoder = BmpDecoder::new(ByteCursor::new(b"BM"));
///     let image = decoder.decode()?;
///     println!("Pixels length: {}", image.pixels().len());
///     Ok(())
/// }
/// ```
///
/// On failure the stream is moved back to where it was when the decoder
/// first touched it, so another decoder can be tried on the same stream.
pub struct BmpDecoder<T>
where
    T: ByteReaderTrait
{
    stream:          ByteReader<T>,
    options:         DecoderOptions,
    decoded_headers: bool,
    start:           Option<u64>,
    container:       Option<ContainerKind>,
    entries:         Vec<IconDirEntry>,
    selected:        Option<usize>,
    info:            InfoHeader,
    colors:          Option<ColorTable>,
    width:           usize,
    height:          usize,
    bottom_up:       bool,
    data_offset:     u64
}

impl<T> BmpDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new decoder that reads data from
    /// `data`
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// Respects the dimension limits and `strict_mode`
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            stream: ByteReader::new(data),
            options,
            decoded_headers: false,
            start: None,
            container: None,
            entries: Vec::new(),
            selected: None,
            info: InfoHeader::default(),
            colors: None,
            width: 0,
            height: 0,
            bottom_up: true,
            data_offset: 0
        }
    }

    /// Check whether the stream starts like a bitmap, icon or cursor
    ///
    /// The stream position is left untouched
    pub fn detect(&mut self) -> bool {
        let mut magic = [0_u8; 6];

        match self.stream.peek_available(&mut magic) {
            Ok(read) => {
                let magic = &magic[..read];
                probe_bmp(magic) || probe_ico(magic) || probe_cur(magic)
            }
            Err(_) => false
        }
    }

    /// Decode the file header, directory and info header
    ///
    /// After calling this the dimensions, container kind and icon entries
    /// are available
    pub fn decode_headers(&mut self) -> Result<(), BmpDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let start = self.entry_position()?;

        if let Err(err) = self.decode_headers_inner(start) {
            self.restore(start);
            return Err(err);
        }
        Ok(())
    }

    /// Decode the image
    ///
    /// # Returns
    /// - A `Bgra32` top-down pixel buffer, with the hotspot attached for cursors
    pub fn decode(&mut self) -> Result<PixelBuffer, BmpDecodeErrors> {
        let start = self.entry_position()?;

        match self.decode_inner(start) {
            Ok(image) => Ok(image),
            Err(err) => {
                self.restore(start);
                Err(err)
            }
        }
    }

    /// Width and height of the image
    ///
    /// Returns `None` if headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        Some((self.width, self.height))
    }

    /// The output pixel format, always `Bgra32`
    ///
    /// Returns `None` if headers haven't been decoded
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        if !self.decoded_headers {
            return None;
        }
        Some(PixelFormat::Bgra32)
    }

    /// Bits per pixel of the stored DIB
    pub fn depth(&self) -> Option<u16> {
        if !self.decoded_headers {
            return None;
        }
        Some(self.info.bit_count)
    }

    /// Which container the bitmap was found in
    pub const fn container(&self) -> Option<ContainerKind> {
        self.container
    }

    /// All entries of the icon or cursor directory
    ///
    /// Empty for plain bitmaps
    pub fn icon_entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// The directory entry that is decoded
    pub fn selected_entry(&self) -> Option<&IconDirEntry> {
        self.selected.and_then(|x| self.entries.get(x))
    }

    /// Cursor hotspot of the decoded entry
    pub fn hotspot(&self) -> Option<Hotspot> {
        if self.container != Some(ContainerKind::Cursor) {
            return None;
        }
        self.selected_entry().map(IconDirEntry::hotspot)
    }

    /// Color table of an indexed bitmap
    pub fn palette(&self) -> Option<&Palette> {
        self.colors.as_ref().map(ColorTable::palette)
    }

    /// Consume the decoder, returning the stream
    pub fn into_inner(self) -> T {
        self.stream.consume()
    }

    fn entry_position(&mut self) -> Result<u64, BmpDecodeErrors> {
        match self.start {
            Some(position) => Ok(position),
            None => {
                let position = self.stream.position()?;
                self.start = Some(position);
                Ok(position)
            }
        }
    }

    fn restore(&mut self, start: u64) {
        self.decoded_headers = false;
        self.container = None;
        self.entries.clear();
        self.selected = None;
        self.colors = None;

        if self.stream.set_position(start).is_err() {
            warn!("Could not restore stream position to {}", start);
        }
    }

    fn decode_headers_inner(&mut self, start: u64) -> Result<(), BmpDecodeErrors> {
        let magic = self.stream.peek_fixed_bytes::<2>()?;

        if probe_bmp(&magic) {
            self.decode_bitmap_headers(start)?;
        } else {
            self.decode_icon_headers(start)?;
        }
        self.decoded_headers = true;

        Ok(())
    }

    fn decode_bitmap_headers(&mut self, start: u64) -> Result<(), BmpDecodeErrors> {
        // magic, file size, reserved
        self.stream.skip(10)?;
        let data_offset = self.stream.get_u32_le_err()?;

        let info = InfoHeader::read(&mut self.stream)?;

        match info.size {
            40 | 108 | 124 => (),
            size => return Err(BmpDecodeErrors::UnsupportedHeaderSize(size))
        }
        info.validate_format()?;

        if info.planes != 1 {
            if self.options.get_strict_mode() {
                return Err(BmpDecodeErrors::GenericStatic("Planes field is not 1"));
            }
            warn!("Planes field is {}, expected 1", info.planes);
        }
        if info.width <= 0 || info.width > MAX_DIB_DIMENSION {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "width",
                MAX_DIB_DIMENSION as usize,
                i64::from(info.width)
            ));
        }
        // negative heights are top-down images
        let height = i64::from(info.height).abs();

        if height == 0 || height > i64::from(MAX_DIB_DIMENSION) {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "height",
                MAX_DIB_DIMENSION as usize,
                i64::from(info.height)
            ));
        }
        self.width = info.width as usize;
        self.height = height as usize;
        self.bottom_up = info.height > 0;

        if info.is_indexed() {
            let colors = info.palette_len();
            let max_colors = 1_u32 << info.bit_count;

            if colors > max_colors {
                if self.options.get_strict_mode() {
                    return Err(BmpDecodeErrors::TooManyColors(colors));
                }
                warn!(
                    "Incorrect number of colors {} for depth {}",
                    colors, info.bit_count
                );
            }
            // the color table follows the info header whatever its version
            self.stream
                .set_position(start + 14 + u64::from(info.size))?;
            self.colors = Some(ColorTable::read(&mut self.stream, colors as usize)?);
        }
        trace!("Container: bitmap");
        trace!("Data offset: {}", data_offset);

        self.container = Some(ContainerKind::Bitmap);
        self.data_offset = start + u64::from(data_offset);
        self.info = info;

        Ok(())
    }

    fn decode_icon_headers(&mut self, start: u64) -> Result<(), BmpDecodeErrors> {
        let reserved = self.stream.get_u16_le_err()?;
        let icon_type = self.stream.get_u16_le_err()?;

        let container = match ContainerKind::from_icon_type(icon_type) {
            Some(kind) if reserved == 0 => kind,
            _ => return Err(BmpDecodeErrors::InvalidMagicBytes)
        };
        let count = self.stream.get_u16_le_err()?;

        if count == 0 {
            return Err(BmpDecodeErrors::EmptyDirectory);
        }
        let mut entries = Vec::with_capacity(usize::from(count));

        for _ in 0..count {
            let entry = IconDirEntry::from_bytes(self.stream.read_fixed_bytes_or_error::<16>()?);

            trace!(
                "Entry {}x{}, {} colors at offset {}",
                entry.width,
                entry.height,
                entry.color_count,
                entry.image_offset
            );
            if entry.reserved != 0 {
                warn!("Icon entry has a non zero reserved byte");
            }
            entries.push(entry);
        }
        let selected = best_entry(&entries).ok_or(BmpDecodeErrors::EmptyDirectory)?;
        let offset = entries[selected].image_offset;

        trace!("Selected entry {}", selected);

        self.stream.set_position(start + u64::from(offset))?;

        let info = InfoHeader::read(&mut self.stream)?;

        if info.size != BITMAPINFOHEADER_SIZE {
            return Err(BmpDecodeErrors::UnsupportedHeaderSize(info.size));
        }
        info.validate_format()?;

        if info.width < 0 || info.width > MAX_DIB_DIMENSION {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "width",
                MAX_DIB_DIMENSION as usize,
                i64::from(info.width)
            ));
        }
        if info.height < 0 || info.height > MAX_DIB_DIMENSION {
            return Err(BmpDecodeErrors::TooLargeDimensions(
                "height",
                MAX_DIB_DIMENSION as usize,
                i64::from(info.height)
            ));
        }
        // stored height covers both the color rows and the mask
        self.width = info.width as usize;
        self.height = (info.height >> 1) as usize;
        self.bottom_up = true;

        if info.is_indexed() {
            let colors = info.palette_len();

            if colors as usize > relic_core::palette::MAX_PALETTE_ENTRIES {
                return Err(BmpDecodeErrors::TooManyColors(colors));
            }
            self.colors = Some(ColorTable::read(&mut self.stream, colors as usize)?);
        }
        // pixel rows follow the color table directly
        self.data_offset = self.stream.position()?;
        self.container = Some(container);
        self.entries = entries;
        self.selected = Some(selected);
        self.info = info;

        Ok(())
    }

    fn decode_inner(&mut self, start: u64) -> Result<PixelBuffer, BmpDecodeErrors> {
        self.decode_headers_inner_once(start)?;

        let layout = PixelLayout::new(
            self.width,
            self.height,
            PixelFormat::Bgra32,
            &self.options
        )?;
        self.stream.set_position(self.data_offset)?;

        let is_icon = self.container != Some(ContainerKind::Bitmap);

        // icons follow the color rows with a one bit mask
        let mut row_bytes = padded_row_size(layout.width(), usize::from(self.info.bit_count));
        if is_icon {
            row_bytes = row_bytes
                .zip(padded_row_size(layout.width(), 1))
                .and_then(|(color, mask)| color.checked_add(mask));
        }
        let row_bytes = row_bytes.ok_or(BmpDecodeErrors::GenericStatic("Row size overflowed"))?;

        self.stream
            .ensure_remaining((row_bytes as u64).saturating_mul(layout.height() as u64))?;

        let mut pixels = layout.allocate()?;
        let alpha = if is_icon {
            AlphaMode::Keep
        } else {
            AlphaMode::Opaque
        };
        read_color_rows(
            &mut self.stream,
            &self.info,
            self.colors.as_ref(),
            &layout,
            &mut pixels,
            self.bottom_up,
            alpha
        )?;

        if is_icon {
            apply_and_mask(&mut self.stream, &layout, &mut pixels)?;
        }
        let mut image = PixelBuffer::new(layout, pixels, None)?;

        if let Some(hotspot) = self.hotspot() {
            trace!("Hotspot: ({}, {})", hotspot.x, hotspot.y);
            image = image.with_hotspot(hotspot);
        }
        Ok(image)
    }

    fn decode_headers_inner_once(&mut self, start: u64) -> Result<(), BmpDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        self.decode_headers_inner(start)
    }
}
