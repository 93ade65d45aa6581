/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Properties shared by all relic decoders, checked against in-memory fixtures

use relic_bmp::BmpDecoder;
use relic_core::buffer::PixelBuffer;
use relic_core::bytestream::ByteCursor;
use relic_core::errors::DecodeErrorKind;
use relic_core::options::DecoderOptions;
use relic_ilbm::IlbmDecoder;
use relic_tga::TgaDecoder;
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

pub mod fixtures;

#[cfg(test)]
mod cross;
#[cfg(test)]
mod manifest;

/// One of the decoder crates
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bmp,
    Ilbm,
    Tga
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Bmp, Format::Ilbm, Format::Tga];

    pub fn detect<T: AsRef<[u8]>>(self, cursor: &mut ByteCursor<T>) -> bool {
        match self {
            Format::Bmp => BmpDecoder::new(cursor).detect(),
            Format::Ilbm => IlbmDecoder::new(cursor).detect(),
            Format::Tga => TgaDecoder::new(cursor).detect()
        }
    }

    pub fn decode<T: AsRef<[u8]>>(
        self, cursor: &mut ByteCursor<T>, options: DecoderOptions
    ) -> Result<PixelBuffer, DecodeErrorKind> {
        match self {
            Format::Bmp => BmpDecoder::new_with_options(cursor, options)
                .decode()
                .map_err(|e| e.kind()),
            Format::Ilbm => IlbmDecoder::new_with_options(cursor, options)
                .decode()
                .map_err(|e| e.kind()),
            Format::Tga => TgaDecoder::new_with_options(cursor, options)
                .decode()
                .map_err(|e| e.kind())
        }
    }
}

/// A fixture listed in `tests/fixtures.json`
#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:         String,
    pub format:       Format,
    pub width:        usize,
    pub height:       usize,
    pub pixel_format: String,
    /// Another fixture that must decode to the same pixels
    pub same_as:      Option<String>,
    pub comment:      Option<String>
}

pub fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}

/// Hash of the pixels and palette of a decoded image
pub fn image_hash(image: &PixelBuffer) -> u128 {
    let mut contents = image.pixels().to_vec();

    if let Some(palette) = image.palette() {
        for entry in palette.entries() {
            contents.extend_from_slice(&[entry.red, entry.green, entry.blue]);
        }
    }
    hash(&contents)
}
