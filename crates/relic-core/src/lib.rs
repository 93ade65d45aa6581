/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by all relic decoders
//!
//! This crate provides the pieces every legacy raster decoder
//! in the `relic` family builds on
//!
//! It currently contains
//!
//! - A bytestream reader with endian aware reads, seeking and peeking
//! - The canonical pixel buffer every decoder produces
//! - A palette table shared by indexed formats
//! - Run length transforms shared by ILBM (byte-run) and TGA (packets)
//! - Decoder options and the common error taxonomy
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//! # Features
//!  - `std`: Enables `std::io` readers as byte sources and `std::error::Error` impls
//!
//!  - `log`: Forwards the logging macros in [`log`](crate::log) to the `log` crate
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod buffer;
pub mod bytestream;
pub mod errors;
pub mod log;
pub mod options;
pub mod palette;
pub mod rle;
mod serde;
