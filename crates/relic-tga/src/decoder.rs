/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// Layout of a Targa file
// - An 18 byte header, see `TgaHeader`.
// - `id_length` bytes of free form image id.
// - The color map, `color_map_length` entries of 15, 16, 24 or 32 bits.
//   Present whenever the color map type is 1, even for true color images.
// - Pixel data, raw or run length encoded, bottom row first unless the
//   descriptor has the upper origin bit set.
// - An optional footer and extension area, not read.

use alloc::vec;

use relic_core::buffer::{ColorKey, PixelBuffer, PixelFormat, PixelLayout};
use relic_core::bytestream::{ByteReader, ByteReaderTrait};
use relic_core::log::{trace, warn};
use relic_core::options::{ByteEndian, DecoderOptions};
use relic_core::palette::{Palette, PaletteEntry, MAX_PALETTE_ENTRIES};
use relic_core::rle::PacketRle;

use crate::header::{TgaHeader, TgaImageType, TGA_HEADER_SIZE};
use crate::TgaDecodeErrors;

/// Probe some bytes to see if they look like a TGA header
///
/// Targa has no signature so this checks that the header fields agree
/// with each other. It can accept data that is not a TGA.
pub fn probe_tga(bytes: &[u8]) -> bool {
    let header = match bytes.get(..TGA_HEADER_SIZE) {
        Some(slice) => {
            let mut store = [0_u8; TGA_HEADER_SIZE];
            store.copy_from_slice(slice);
            TgaHeader::from_bytes(store)
        }
        None => return false
    };
    let kind = match header.kind() {
        Some(kind) if kind.is_supported() => kind,
        _ => return false
    };
    if header.color_map_type > 1 || header.is_interleaved() {
        return false;
    }
    if header.width == 0 || header.height == 0 {
        return false;
    }
    if header.has_color_map() && !matches!(header.color_map_depth, 15 | 16 | 24 | 32) {
        return false;
    }
    if kind.is_indexed() {
        header.has_color_map()
            && header.pixel_depth == 8
            && (1..=MAX_PALETTE_ENTRIES).contains(&usize::from(header.color_map_length))
    } else if kind.is_greyscale() {
        header.pixel_depth == 8
    } else {
        matches!(header.pixel_depth, 15 | 16 | 24 | 32)
    }
}

/// A Truevision TGA decoder
///
/// # Usage
/// ```no_run
/// use relic_core::bytestream::ByteCursor;
/// use relic_tga::TgaDecoder;
///
/// fn main() -> Result<(), relic_tga::TgaDecodeErrors> {
///     let data = std::fs::read("image.tga").unwrap();
///     let mut decoder = TgaDecoder::new(ByteCursor::new(data));
///     let image = decoder.decode()?;
///     println!("{}x{} {:?}", image.width(), image.height(), image.pixel_format());
///     Ok(())
/// }
/// ```
///
/// Greyscale images come out as `Indexed8` with a 256 entry grey ramp.
pub struct TgaDecoder<T>
where
    T: ByteReaderTrait
{
    stream:          ByteReader<T>,
    options:         DecoderOptions,
    decoded_headers: bool,
    start:           Option<u64>,
    header:          Option<TgaHeader>,
    palette:         Option<Palette>,
    color_key:       Option<u32>,
    data_offset:     u64
}

impl<T> TgaDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new decoder that reads data from
    /// `data`
    pub fn new(data: T) -> TgaDecoder<T> {
        TgaDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// Respects the dimension limits, `strict_mode` and `byte_endian`
    pub fn new_with_options(data: T, options: DecoderOptions) -> TgaDecoder<T> {
        TgaDecoder {
            stream: ByteReader::new(data),
            options,
            decoded_headers: false,
            start: None,
            header: None,
            palette: None,
            color_key: None,
            data_offset: 0
        }
    }

    /// Check whether the stream starts with a plausible TGA header
    ///
    /// The stream position is left untouched
    pub fn detect(&mut self) -> bool {
        let mut header = [0_u8; TGA_HEADER_SIZE];

        match self.stream.peek_available(&mut header) {
            Ok(read) => probe_tga(&header[..read]),
            Err(_) => false
        }
    }

    /// Decode the header, image id and color map
    pub fn decode_headers(&mut self) -> Result<(), TgaDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let start = self.entry_position()?;

        if let Err(err) = self.decode_headers_inner() {
            self.restore(start);
            return Err(err);
        }
        Ok(())
    }

    /// Decode the image
    ///
    /// # Returns
    /// - A top-down pixel buffer in `Indexed8`, `Xrgb1555`, `Bgr24` or `Bgra32`
    pub fn decode(&mut self) -> Result<PixelBuffer, TgaDecodeErrors> {
        let start = self.entry_position()?;

        match self.decode_inner() {
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
        self.header
            .map(|h| (usize::from(h.width), usize::from(h.height)))
    }

    /// The output pixel format
    ///
    /// Returns `None` if headers haven't been decoded
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        if !self.decoded_headers {
            return None;
        }
        self.header.as_ref().and_then(output_format)
    }

    /// The file header
    pub const fn header(&self) -> Option<&TgaHeader> {
        self.header.as_ref()
    }

    /// The image type, `None` before headers are decoded
    pub fn image_type(&self) -> Option<TgaImageType> {
        self.header.and_then(|h| h.kind())
    }

    /// Palette of an indexed or greyscale image
    pub const fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Consume the decoder, returning the stream
    pub fn into_inner(self) -> T {
        self.stream.consume()
    }

    fn entry_position(&mut self) -> Result<u64, TgaDecodeErrors> {
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
        self.header = None;
        self.palette = None;
        self.color_key = None;

        if self.stream.set_position(start).is_err() {
            warn!("Could not restore stream position to {}", start);
        }
    }

    fn decode_headers_inner(&mut self) -> Result<(), TgaDecodeErrors> {
        let header = TgaHeader::read(&mut self.stream)?;

        if header.color_map_type > 1 {
            return Err(TgaDecodeErrors::InvalidColorMapType(header.color_map_type));
        }
        let kind = header
            .kind()
            .ok_or(TgaDecodeErrors::InvalidImageType(header.image_type))?;

        if !kind.is_supported() {
            return Err(TgaDecodeErrors::UnsupportedImageType(header.image_type));
        }
        if header.is_interleaved() {
            return Err(TgaDecodeErrors::Interleaved(header.descriptor));
        }
        if header.is_right_origin() {
            return Err(TgaDecodeErrors::RightOrigin);
        }
        if kind.is_indexed() {
            if !header.has_color_map() {
                return Err(TgaDecodeErrors::MissingColorMap);
            }
            if usize::from(header.color_map_length) > MAX_PALETTE_ENTRIES {
                return Err(TgaDecodeErrors::TooManyColors(header.color_map_length));
            }
        }
        if output_format(&header).is_none() {
            return Err(TgaDecodeErrors::UnsupportedDepth(
                header.image_type,
                header.pixel_depth
            ));
        }
        trace!("Image type: {:?}", kind);
        trace!("Width: {}", header.width);
        trace!("Height: {}", header.height);
        trace!("Pixel depth: {}", header.pixel_depth);
        trace!(
            "Color map: {} entries of {} bits",
            header.color_map_length,
            header.color_map_depth
        );

        self.stream.skip(usize::from(header.id_length))?;

        if kind.is_indexed() {
            self.read_color_map(&header)?;
        } else {
            // present but unused
            self.stream.skip(header.color_map_size())?;
        }
        if kind.is_greyscale() {
            self.palette = Some(Palette::greyscale_ramp());
        }
        self.data_offset = self.stream.position()?;
        self.header = Some(header);
        self.decoded_headers = true;

        Ok(())
    }

    fn read_color_map(&mut self, header: &TgaHeader) -> Result<(), TgaDecodeErrors> {
        let length = usize::from(header.color_map_length);
        let mut raw = vec![0_u8; header.color_map_size()];
        self.stream.read_exact_bytes(&mut raw)?;

        let mut palette = Palette::with_len(length)?;
        let mut color_key = None;

        match header.color_map_depth {
            15 | 16 => {
                for (i, entry) in raw.chunks_exact(2).enumerate() {
                    let c = u16::from_le_bytes([entry[0], entry[1]]);
                    let color = PaletteEntry::new(
                        ((c >> 7) & 0xF8) as u8,
                        ((c >> 2) & 0xF8) as u8,
                        (c << 3) as u8
                    );
                    palette.set(i, color)?;
                }
            }
            depth @ (24 | 32) => {
                let size = usize::from(depth) / 8;

                for (i, entry) in raw.chunks_exact(size).enumerate() {
                    palette.set(i, PaletteEntry::new(entry[2], entry[1], entry[0]))?;

                    // a later translucent entry replaces an earlier one
                    if depth == 32 && entry[3] < 128 {
                        color_key = Some(i as u32);
                    }
                }
            }
            depth => {
                if self.options.get_strict_mode() {
                    return Err(TgaDecodeErrors::UnsupportedColorMapDepth(depth));
                }
                warn!("Unknown color map depth {}, entries left black", depth);
            }
        }
        trace!("Color key: {:?}", color_key);
        self.palette = Some(palette);
        self.color_key = color_key;

        Ok(())
    }

    fn decode_inner(&mut self) -> Result<PixelBuffer, TgaDecodeErrors> {
        if !self.decoded_headers {
            self.decode_headers_inner()?;
        }
        let header = self
            .header
            .ok_or(TgaDecodeErrors::GenericStatic("Headers not decoded"))?;
        let kind = header
            .kind()
            .ok_or(TgaDecodeErrors::InvalidImageType(header.image_type))?;
        let format = output_format(&header).ok_or(TgaDecodeErrors::UnsupportedDepth(
            header.image_type,
            header.pixel_depth
        ))?;

        let layout = PixelLayout::new(
            usize::from(header.width),
            usize::from(header.height),
            format,
            &self.options
        )?;
        let bytes_per_pixel = format.bytes_per_pixel();

        trace!("Output format: {:?}", format);

        self.stream.set_position(self.data_offset)?;

        let total = (layout.width() as u64).saturating_mul(layout.height() as u64);
        // a packet holds at most 128 pixels
        let needed = if kind.is_rle() {
            total.div_ceil(128).saturating_mul(1 + bytes_per_pixel as u64)
        } else {
            total.saturating_mul(bytes_per_pixel as u64)
        };
        self.stream.ensure_remaining(needed)?;

        let mut pixels = layout.allocate()?;

        let mut packets = PacketRle::new();
        let height = layout.height();

        for i in 0..height {
            // lower origin images store the bottom row first
            let y = if header.is_upper_origin() {
                i
            } else {
                height - 1 - i
            };
            let start = y * layout.stride();
            let row = pixels
                .get_mut(start..start + layout.row_bytes())
                .ok_or(TgaDecodeErrors::GenericStatic("Row outside of pixel store"))?;

            if kind.is_rle() {
                packets.fill_row(&mut self.stream, row, bytes_per_pixel)?;
            } else {
                self.stream.read_exact_bytes(row)?;
            }
        }
        if packets.is_pending() {
            trace!("Run length packet continues past the last row");
        }
        // stored little endian
        if bytes_per_pixel == 2 && self.options.get_byte_endian().resolve() == ByteEndian::BE {
            for pixel in pixels.chunks_exact_mut(2) {
                pixel.swap(0, 1);
            }
        }
        let palette = if format.has_palette() {
            self.palette.clone()
        } else {
            None
        };
        let mut image = PixelBuffer::new(layout, pixels, palette)?;

        // only color mapped images carry a key, true color alpha is left alone
        match self.color_key {
            Some(key) if kind.is_indexed() => {
                image = image.with_color_key(ColorKey(key))?;
            }
            _ => ()
        }
        Ok(image)
    }
}

/// Output format for the pixel depth and image type in `header`
///
/// `None` for combinations that can't be decoded
fn output_format(header: &TgaHeader) -> Option<PixelFormat> {
    let kind = header.kind()?;

    if kind.is_indexed() || kind.is_greyscale() {
        return (header.pixel_depth == 8).then_some(PixelFormat::Indexed8);
    }
    if !kind.is_true_color() {
        return None;
    }
    match header.pixel_depth {
        15 | 16 => Some(PixelFormat::Xrgb1555),
        24 => Some(PixelFormat::Bgr24),
        32 => Some(PixelFormat::Bgra32),
        _ => None
    }
}
