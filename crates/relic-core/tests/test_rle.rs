/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relic_core::bytestream::{ByteCursor, ByteReader};
use relic_core::errors::{DecodeErrorKind, RleErrors};
use relic_core::rle::{decode_byte_run, PacketRle};

#[test]
fn byte_run_repeat_then_literal() {
    // 0xFE repeats the next byte three times, 0x01 copies two literals
    let data = [0xFE, 0xAA, 0x01, 0x10, 0x20];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut out = [0_u8; 5];

    decode_byte_run(&mut reader, &mut out).unwrap();

    assert_eq!(out, [0xAA, 0xAA, 0xAA, 0x10, 0x20]);
    assert_eq!(reader.position().unwrap(), 5);
}

#[test]
fn byte_run_longest_repeat() {
    let data = [0x80, 0x07];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut out = [0_u8; 129];

    decode_byte_run(&mut reader, &mut out).unwrap();

    assert!(out.iter().all(|x| *x == 0x07));
}

#[test]
fn byte_run_overrun_is_malformed() {
    // asks for four literals in a three byte row
    let data = [0x03, 1, 2, 3, 4];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut out = [0_u8; 3];

    let err = decode_byte_run(&mut reader, &mut out).unwrap_err();

    assert!(matches!(err, RleErrors::Overrun(4, 3)));
    assert_eq!(err.kind(), DecodeErrorKind::MalformedData);
}

#[test]
fn byte_run_repeat_overrun_is_malformed() {
    let data = [0xFD, 0x55];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut out = [0_u8; 3];

    let err = decode_byte_run(&mut reader, &mut out).unwrap_err();
    assert!(matches!(err, RleErrors::Overrun(4, 3)));
}

#[test]
fn byte_run_truncated_stream() {
    let data = [0x04, 1, 2];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut out = [0_u8; 5];

    let err = decode_byte_run(&mut reader, &mut out).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::Truncated);
}

#[test]
fn packets_span_row_boundaries() {
    // raw packet of two pixels, then a run of four pixels
    let data = [0x01, 0x0A, 0x0B, 0x83, 0x0C];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut rle = PacketRle::new();

    let mut first = [0_u8; 3];
    let mut second = [0_u8; 3];

    rle.fill_row(&mut reader, &mut first, 1).unwrap();
    assert!(rle.is_pending());
    rle.fill_row(&mut reader, &mut second, 1).unwrap();

    assert_eq!(first, [0x0A, 0x0B, 0x0C]);
    assert_eq!(second, [0x0C, 0x0C, 0x0C]);
    assert!(!rle.is_pending());
}

#[test]
fn raw_packet_spans_rows_with_wide_pixels() {
    // raw packet of three 2 byte pixels across two rows of two pixels,
    // then a run of one pixel
    let data = [0x02, 1, 2, 3, 4, 5, 6, 0x80, 7, 8];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut rle = PacketRle::new();

    let mut first = [0_u8; 4];
    let mut second = [0_u8; 4];

    rle.fill_row(&mut reader, &mut first, 2).unwrap();
    rle.fill_row(&mut reader, &mut second, 2).unwrap();

    assert_eq!(first, [1, 2, 3, 4]);
    assert_eq!(second, [5, 6, 7, 8]);
}

#[test]
fn packet_truncated_stream() {
    let data = [0x03, 1, 2];
    let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
    let mut rle = PacketRle::new();
    let mut row = [0_u8; 4];

    let err = rle.fill_row(&mut reader, &mut row, 1).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::Truncated);
}
