/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global decoder options
//!
//! One set of options is shared by every relic decoder, each decoder
//! documents which of them it respects.

/// Largest width or height any decoder will accept.
///
/// Dimension fields above this are treated as corrupt, it keeps
/// stride computations far away from overflow on 32 bit targets.
pub const MAX_DIMENSIONS: usize = 0x00FF_FFFF;

/// Default width and height limit, raise it with
/// [`DecoderOptions::set_max_width`] and [`DecoderOptions::set_max_height`]
pub const DEFAULT_MAX_DIMENSION: usize = 1 << 14;

/// The endianness used to store samples that span more than one byte
///
/// Only two byte pixels (`Xrgb1555`) are affected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ByteEndian {
    /// Little endian
    LE,
    /// Big endian
    BE,
    /// The endianness of the machine running the decoder
    #[default]
    Native
}

impl ByteEndian {
    /// Resolve `Native` into the host byte order
    pub const fn resolve(self) -> ByteEndian {
        match self {
            ByteEndian::Native => {
                if cfg!(target_endian = "little") {
                    ByteEndian::LE
                } else {
                    ByteEndian::BE
                }
            }
            endian => endian
        }
    }
}

/// Decoder options
///
/// Not all options are respected by all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: `1 << 14`
    /// - Respected by: `all decoders`
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: `1 << 14`
    /// - Respected by: `all decoders`
    max_height:  usize,
    /// Whether oddities that are usually tolerated
    /// should be reported as errors
    ///
    /// - Default value: false
    /// - Respected by: `all decoders`
    strict_mode: bool,
    /// The byte endian of two byte pixels in the output
    ///
    /// - Default value: `ByteEndian::Native`
    /// - Respected by: `tga`
    endianness:  ByteEndian
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:   DEFAULT_MAX_DIMENSION,
            max_height:  DEFAULT_MAX_DIMENSION,
            strict_mode: false,
            endianness:  ByteEndian::Native
        }
    }
}

impl DecoderOptions {
    /// Create default options, identical to `DecoderOptions::default()`
    pub fn new() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject tolerated oddities
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Get the byte endian for which samples that span more than one byte will
    /// be stored
    pub const fn get_byte_endian(&self) -> ByteEndian {
        self.endianness
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// Values above [`MAX_DIMENSIONS`] are clamped to it.
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width.min(MAX_DIMENSIONS);
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// Values above [`MAX_DIMENSIONS`] are clamped to it.
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height.min(MAX_DIMENSIONS);
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// This reduces the error tolerance level for the decoders, quirks that are
    /// normally logged and worked around become errors
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set the byte endian for which two byte pixels will be stored
    #[must_use]
    pub fn set_byte_endian(mut self, endian: ByteEndian) -> Self {
        self.endianness = endian;
        self
    }
}
