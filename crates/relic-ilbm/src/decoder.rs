/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// An IFF file is a FORM chunk wrapping a list of chunks, each a 4 byte tag,
// a big endian size and the payload padded to an even length.
//
// For rasters we care about
// - BMHD: dimensions, plane count, masking, compression and the transparent color
// - CMAP: RGB triplets
// - CAMG: the Amiga view mode, selects HAM and EHB
// - BODY: the rows, for each row every plane (plus the stencil) one after another,
//   each either raw or byte-run compressed
//
// Everything else is skipped.

use alloc::vec;

use relic_core::buffer::{ColorKey, PixelBuffer, PixelFormat, PixelLayout};
use relic_core::bytestream::{ByteReader, ByteReaderTrait};
use relic_core::log::{trace, warn};
use relic_core::options::DecoderOptions;
use relic_core::palette::{Palette, PaletteEntry, MAX_PALETTE_ENTRIES};
use relic_core::rle::decode_byte_run;

use crate::header::{BitmapHeader, FormKind, ViewMode, BMHD, BMHD_SIZE, BODY, CAMG, CMAP, FORM};
use crate::planar::{deinterleave, hold_and_modify, true_color, PlaneRows};
use crate::IlbmDecodeErrors;

/// Probe some bytes to see
/// if they start with an ILBM or PBM form
pub fn probe_ilbm(bytes: &[u8]) -> bool {
    if let Some(magic) = bytes.get(0..12) {
        return magic[0..4] == FORM && (&magic[8..12] == b"ILBM" || &magic[8..12] == b"PBM ");
    }
    false
}

/// Plane geometry derived from the bitmap header
#[derive(Copy, Clone, Debug)]
struct RowGeometry {
    width:         usize,
    bytes_per_row: usize,
    planes:        usize,
    stencil:       usize
}

/// An ILBM and PBM decoder
///
/// # Usage
/// ```no_run
/// use relic_core::bytestream::ByteCursor;
/// use relic_ilbm::IlbmDecoder;
///
/// fn main() -> Result<(), relic_ilbm::IlbmDecodeErrors> {
///     let mut decoder = IlbmDecoder::new(ByteCursor::new(b"FORM"));
///     let image = decoder.decode()?;
///     println!("{}x{}", image.width(), image.height());
///     Ok(())
/// }
/// ```
pub struct IlbmDecoder<T>
where
    T: ByteReaderTrait
{
    stream:          ByteReader<T>,
    options:         DecoderOptions,
    decoded_headers: bool,
    start:           Option<u64>,
    form:            Option<FormKind>,
    header:          Option<BitmapHeader>,
    view_mode:       ViewMode,
    color_map:       Option<Palette>,
    body_offset:     u64
}

impl<T> IlbmDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new decoder that reads data from `data`
    pub fn new(data: T) -> IlbmDecoder<T> {
        IlbmDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// Respects the dimension limits and `strict_mode`
    pub fn new_with_options(data: T, options: DecoderOptions) -> IlbmDecoder<T> {
        IlbmDecoder {
            stream: ByteReader::new(data),
            options,
            decoded_headers: false,
            start: None,
            form: None,
            header: None,
            view_mode: ViewMode::default(),
            color_map: None,
            body_offset: 0
        }
    }

    /// Check whether the stream starts with an ILBM or PBM form
    ///
    /// The stream position is left untouched
    pub fn detect(&mut self) -> bool {
        let mut magic = [0_u8; 12];

        match self.stream.peek_available(&mut magic) {
            Ok(read) => probe_ilbm(&magic[..read]),
            Err(_) => false
        }
    }

    /// Walk the chunks up to `BODY`
    ///
    /// After this the bitmap header, view mode and color map are available
    pub fn decode_headers(&mut self) -> Result<(), IlbmDecodeErrors> {
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
    /// - An `Indexed8` buffer with its palette, or `Rgb24` for HAM and 24 plane images
    pub fn decode(&mut self) -> Result<PixelBuffer, IlbmDecodeErrors> {
        let start = self.entry_position()?;

        match self.decode_inner() {
            Ok(image) => Ok(image),
            Err(err) => {
                self.restore(start);
                Err(err)
            }
        }
    }

    /// Output width and height
    ///
    /// The width is the header width rounded up to a multiple of 16.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .map(|h| (h.padded_width(), usize::from(h.height)))
    }

    /// The pixel format `decode` will produce
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        let header = self.header?;
        let form = self.form?;
        Some(self.output_format(&header, form))
    }

    pub const fn bitmap_header(&self) -> Option<&BitmapHeader> {
        self.header.as_ref()
    }

    /// Whether the image is interleaved or packed
    pub const fn form_kind(&self) -> Option<FormKind> {
        self.form
    }

    /// The `CAMG` view mode, zero when the chunk is absent
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The `CMAP` entries as stored
    pub const fn color_map(&self) -> Option<&Palette> {
        self.color_map.as_ref()
    }

    /// Consume the decoder, returning the stream
    pub fn into_inner(self) -> T {
        self.stream.consume()
    }

    fn entry_position(&mut self) -> Result<u64, IlbmDecodeErrors> {
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
        self.form = None;
        self.header = None;
        self.view_mode = ViewMode::default();
        self.color_map = None;

        if self.stream.set_position(start).is_err() {
            warn!("Could not restore stream position to {}", start);
        }
    }

    fn decode_headers_inner(&mut self) -> Result<(), IlbmDecodeErrors> {
        if self.stream.read_fixed_bytes_or_error::<4>()? != FORM {
            return Err(IlbmDecodeErrors::InvalidMagicBytes);
        }
        // form size, not needed, BODY tells us where the rows are
        self.stream.skip(4)?;

        let form_type = self.stream.read_fixed_bytes_or_error::<4>()?;
        let form =
            FormKind::from_tag(form_type).ok_or(IlbmDecodeErrors::UnknownFormType(form_type))?;

        trace!("Form: {:?}", form);

        let mut header = None;
        let mut view_mode = ViewMode::default();
        let mut color_map = None;

        loop {
            let tag = self.stream.read_fixed_bytes_or_error::<4>()?;
            let size = self.stream.get_u32_be_err()?;

            if tag == BODY {
                break;
            }
            // chunks are word aligned
            let padded = u64::from(size) + u64::from(size & 1);
            let read: u64 = match tag {
                BMHD => {
                    if size < BMHD_SIZE {
                        return Err(IlbmDecodeErrors::GenericStatic("BMHD chunk is too small"));
                    }
                    header = Some(BitmapHeader::read(&mut self.stream)?);
                    u64::from(BMHD_SIZE)
                }
                CMAP => {
                    if size as usize > MAX_PALETTE_ENTRIES * 3 {
                        return Err(IlbmDecodeErrors::ColorMapTooLarge(size));
                    }
                    let count = size as usize / 3;
                    let mut palette = Palette::new();

                    for _ in 0..count {
                        let [r, g, b] = self.stream.read_fixed_bytes_or_error::<3>()?;
                        palette.push(PaletteEntry::new(r, g, b))?;
                    }
                    trace!("Color map entries: {}", count);
                    color_map = Some(palette);
                    (count * 3) as u64
                }
                CAMG => {
                    if size < 4 {
                        return Err(IlbmDecodeErrors::GenericStatic("CAMG chunk is too small"));
                    }
                    view_mode = ViewMode(self.stream.get_u32_be_err()?);
                    trace!("View mode: {:#x}", view_mode.0);
                    4
                }
                _ => 0
            };
            let remaining = usize::try_from(padded - read)
                .map_err(|_| IlbmDecodeErrors::GenericStatic("Chunk too large to skip"))?;
            self.stream.skip(remaining)?;
        }
        let header = header.ok_or(IlbmDecodeErrors::MissingBitmapHeader)?;

        self.body_offset = self.stream.position()?;
        self.form = Some(form);
        self.header = Some(header);
        self.view_mode = view_mode;
        self.color_map = color_map;
        self.decoded_headers = true;

        Ok(())
    }

    fn output_format(&self, header: &BitmapHeader, form: FormKind) -> PixelFormat {
        let geometry = Self::geometry(header, form);

        if geometry.planes == 24 || self.view_mode.is_ham() {
            PixelFormat::Rgb24
        } else {
            PixelFormat::Indexed8
        }
    }

    fn geometry(header: &BitmapHeader, form: FormKind) -> RowGeometry {
        let mut bytes_per_row = ((usize::from(header.width) + 15) / 16) * 2;
        let mut planes = usize::from(header.planes);

        if form == FormKind::Pbm {
            // one plane holding a whole byte per pixel
            bytes_per_row *= 8;
            planes = 1;
        }
        RowGeometry {
            width: header.padded_width(),
            bytes_per_row,
            planes,
            stencil: usize::from(header.has_stencil())
        }
    }

    fn validate(&self, header: &BitmapHeader, geometry: &RowGeometry) -> Result<(), IlbmDecodeErrors> {
        let ham = self.view_mode.is_ham();
        let supported = if ham {
            (3..=8).contains(&geometry.planes)
        } else {
            (1..=8).contains(&geometry.planes) || geometry.planes == 24
        };
        if !supported {
            return Err(IlbmDecodeErrors::UnsupportedPlanes(header.planes, ham));
        }
        if header.compression > 1 {
            if self.options.get_strict_mode() {
                return Err(IlbmDecodeErrors::UnsupportedCompression(header.compression));
            }
            warn!(
                "Unknown compression {}, reading body uncompressed",
                header.compression
            );
        }
        Ok(())
    }

    /// Build the palette of an indexed image
    fn resolve_palette(
        &self, header: &BitmapHeader, form: FormKind, geometry: &RowGeometry
    ) -> Palette {
        let mut palette = match &self.color_map {
            Some(map) if !map.is_empty() => map.clone(),
            _ => {
                // a packed bitmap still stores `planes` bits in each byte
                let grey_bits = match form {
                    FormKind::Pbm => usize::from(header.planes).clamp(1, 8),
                    FormKind::Ilbm => geometry.planes
                };
                warn!("No color map, using a {} level grey ramp", 1_usize << grey_bits);
                return Palette::greyscale_levels(1 << grey_bits);
            }
        };
        // a packed bitmap counts as a single plane here, so it never gets EHB
        if (palette.len() == 32 || self.view_mode.is_ehb()) && geometry.planes == 6 {
            trace!("Extra-Half-Bright palette");
            palette.extend_half_bright();
        }
        // stencil pixels carry an extra index bit, give them the colors
        // the bit would select without it
        let target = 1_usize << (geometry.planes + geometry.stencil).min(8);
        palette.pad_repeating(target);

        palette
    }

    fn decode_inner(&mut self) -> Result<PixelBuffer, IlbmDecodeErrors> {
        if !self.decoded_headers {
            self.decode_headers_inner()?;
        }
        let header = self
            .header
            .ok_or(IlbmDecodeErrors::MissingBitmapHeader)?;
        let form = self.form.ok_or(IlbmDecodeErrors::InvalidMagicBytes)?;

        let geometry = Self::geometry(&header, form);
        self.validate(&header, &geometry)?;

        let format = self.output_format(&header, form);
        let layout = PixelLayout::new(
            geometry.width,
            usize::from(header.height),
            format,
            &self.options
        )?;
        let total_planes = geometry.planes + geometry.stencil;
        let compressed = header.compression == 1;

        self.stream.set_position(self.body_offset)?;

        // a byte-run pair expands to at most 128 bytes
        let plane_row_bytes = if compressed {
            geometry.bytes_per_row.div_ceil(128) * 2
        } else {
            geometry.bytes_per_row
        };
        let needed = (plane_row_bytes as u64)
            .saturating_mul(total_planes as u64)
            .saturating_mul(layout.height() as u64);
        self.stream.ensure_remaining(needed)?;

        let mut pixels = layout.allocate()?;

        let palette = if format == PixelFormat::Indexed8 {
            Some(self.resolve_palette(&header, form, &geometry))
        } else {
            None
        };
        // HAM looks colors up in the stored map
        let ham_palette = self.color_map.clone().unwrap_or_default();

        let mut scratch = vec![0_u8; geometry.bytes_per_row * total_planes];

        trace!("Output format: {:?}", format);
        trace!("Bytes per plane row: {}", geometry.bytes_per_row);

        for y in 0..layout.height() {
            for plane_row in scratch.chunks_exact_mut(geometry.bytes_per_row) {
                if compressed {
                    decode_byte_run(&mut self.stream, plane_row)?;
                } else {
                    self.stream.read_exact_bytes(plane_row)?;
                }
            }
            let start = y * layout.stride();
            let row = pixels
                .get_mut(start..start + layout.row_bytes())
                .ok_or(IlbmDecodeErrors::GenericStatic("Row outside of pixel store"))?;

            let planes = PlaneRows::new(&scratch, geometry.bytes_per_row);

            match (form, format) {
                (FormKind::Pbm, _) => {
                    row.copy_from_slice(&scratch[..geometry.width]);
                }
                (FormKind::Ilbm, PixelFormat::Indexed8) => {
                    deinterleave(&planes, total_planes, row);
                }
                _ if self.view_mode.is_ham() => {
                    hold_and_modify(&planes, geometry.planes, &ham_palette, row);
                }
                _ => {
                    true_color(&planes, row);
                }
            }
        }
        let mut image = PixelBuffer::new(layout, pixels, palette)?;

        if header.has_color_key() {
            let key = header.transparent_color;
            // true color output takes the value as is, it always fits 24 bits
            let in_range = match image.palette() {
                Some(palette) => usize::from(key) < palette.len(),
                None => true
            };

            if in_range {
                image = image.with_color_key(ColorKey(u32::from(key)))?;
            } else {
                warn!("Transparent color {} ignored", key);
            }
        }
        Ok(image)
    }
}
