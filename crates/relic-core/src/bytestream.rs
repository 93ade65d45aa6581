/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! with endian aware reads, seeking and peeking.
//!
//! Every decoder reads its input through [`ByteReader`], which wraps
//! anything implementing [`ByteReaderTrait`]. Reads are length checked,
//! a short read is reported as an error instead of filling with zeroes.
pub use cursor::ByteCursor;
pub use reader::{ByteIoError, ByteReader, ByteSeek};
pub use traits::ByteReaderTrait;

mod cursor;
mod reader;
mod std_readers;
mod traits;
