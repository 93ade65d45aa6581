/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relic_bmp::{BmpDecodeErrors, BmpDecoder, ContainerKind};
use relic_core::buffer::{Hotspot, PixelFormat};
use relic_core::bytestream::{ByteCursor, ByteReaderTrait, ByteSeek};
use relic_core::errors::DecodeErrorKind;

struct Entry {
    width:     u8,
    height:    u8,
    colors:    u8,
    planes:    u16,
    bit_count: u16,
    dib:       Vec<u8>
}

fn info_header(width: i32, height: i32, bit_count: u16, clr_used: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    // stored height covers the AND mask
    out.extend_from_slice(&(height * 2).to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    // compression, image size, resolution
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(&clr_used.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out
}

fn directory(icon_type: u16, entries: &[Entry]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0_u16.to_le_bytes());
    out.extend_from_slice(&icon_type.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());

    let mut offset = 6 + 16 * entries.len();

    for entry in entries {
        out.extend_from_slice(&[entry.width, entry.height, entry.colors, 0]);
        out.extend_from_slice(&entry.planes.to_le_bytes());
        out.extend_from_slice(&entry.bit_count.to_le_bytes());
        out.extend_from_slice(&(entry.dib.len() as u32).to_le_bytes());
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += entry.dib.len();
    }
    for entry in entries {
        out.extend_from_slice(&entry.dib);
    }
    out
}

/// 2x2 black and white icon, the mask clears the top left pixel
fn two_by_two_dib() -> Vec<u8> {
    let mut dib = info_header(2, 2, 1, 0);
    // palette, black then white, reserved bytes zero
    dib.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
    // color rows bottom-up, bottom row is white black, top row black white
    dib.extend_from_slice(&[0x80, 0, 0, 0]);
    dib.extend_from_slice(&[0x40, 0, 0, 0]);
    // mask rows bottom-up, only the top left pixel is masked
    dib.extend_from_slice(&[0x00, 0, 0, 0]);
    dib.extend_from_slice(&[0x80, 0, 0, 0]);
    dib
}

fn two_by_two_icon(icon_type: u16) -> Vec<u8> {
    directory(
        icon_type,
        &[Entry {
            width:     2,
            height:    2,
            colors:    2,
            planes:    5,
            bit_count: 7,
            dib:       two_by_two_dib()
        }]
    )
}

#[test]
fn decode_masked_one_bit_icon() {
    let data = two_by_two_icon(1);
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));

    assert!(decoder.detect());
    let image = decoder.decode().unwrap();

    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.pixel_format(), PixelFormat::Bgra32);
    assert_eq!(image.hotspot(), None);

    assert_eq!(image.row(0).unwrap(), &[0, 0, 0, 0, 255, 255, 255, 255]);
    assert_eq!(image.row(1).unwrap(), &[255, 255, 255, 255, 0, 0, 0, 255]);
    assert_eq!(decoder.container(), Some(ContainerKind::Icon));
}

#[test]
fn cursor_carries_hotspot() {
    let data = two_by_two_icon(2);
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));

    let image = decoder.decode().unwrap();

    assert_eq!(image.hotspot(), Some(Hotspot { x: 5, y: 7 }));
    assert_eq!(decoder.container(), Some(ContainerKind::Cursor));
}

fn solid_24_bit_dib(bgr: [u8; 3]) -> Vec<u8> {
    let mut dib = info_header(1, 1, 24, 0);
    dib.extend_from_slice(&bgr);
    dib.push(0);
    // mask row
    dib.extend_from_slice(&[0, 0, 0, 0]);
    dib
}

#[test]
fn picks_entry_with_most_colors() {
    let data = directory(
        1,
        &[
            Entry {
                width:     1,
                height:    1,
                colors:    16,
                planes:    1,
                bit_count: 24,
                dib:       solid_24_bit_dib([1, 1, 1])
            },
            // zero means 256 colors
            Entry {
                width:     1,
                height:    1,
                colors:    0,
                planes:    1,
                bit_count: 24,
                dib:       solid_24_bit_dib([2, 2, 2])
            },
            Entry {
                width:     1,
                height:    1,
                colors:    0,
                planes:    1,
                bit_count: 24,
                dib:       solid_24_bit_dib([3, 3, 3])
            }
        ]
    );
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));
    let image = decoder.decode().unwrap();

    // the first of the two 256 color entries wins
    assert_eq!(image.pixels(), &[2, 2, 2, 255]);
    assert_eq!(decoder.icon_entries().len(), 3);
    assert_eq!(decoder.selected_entry().unwrap().color_count, 256);
}

#[test]
fn thirty_two_bit_keeps_alpha() {
    let mut dib = info_header(1, 1, 32, 0);
    dib.extend_from_slice(&[10, 20, 30, 40]);
    dib.extend_from_slice(&[0, 0, 0, 0]);

    let data = directory(
        1,
        &[Entry {
            width: 1,
            height: 1,
            colors: 0,
            planes: 1,
            bit_count: 32,
            dib
        }]
    );
    let image = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap();
    assert_eq!(image.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn palette_alpha_is_kept_when_set() {
    let mut dib = info_header(1, 1, 8, 1);
    dib.extend_from_slice(&[1, 2, 3, 0x80]);
    dib.extend_from_slice(&[0, 0, 0, 0]);
    dib.extend_from_slice(&[0, 0, 0, 0]);

    let data = directory(
        1,
        &[Entry {
            width: 1,
            height: 1,
            colors: 1,
            planes: 1,
            bit_count: 8,
            dib
        }]
    );
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));
    let image = decoder.decode().unwrap();

    assert_eq!(image.pixels(), &[1, 2, 3, 0x80]);
    assert_eq!(decoder.palette().unwrap().len(), 1);
}

#[test]
fn empty_directory_is_malformed() {
    let data: [u8; 6] = [0, 0, 1, 0, 0, 0];
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));

    assert!(!decoder.detect());
    let err = decoder.decode().unwrap_err();

    assert!(matches!(err, BmpDecodeErrors::EmptyDirectory));
    assert_eq!(err.kind(), DecodeErrorKind::MalformedData);
}

#[test]
fn unknown_directory_type_is_bad_magic() {
    let data: [u8; 6] = [0, 0, 3, 0, 1, 0];
    let err = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap_err();

    assert_eq!(err.kind(), DecodeErrorKind::BadMagic);
}

#[test]
fn rejects_other_header_sizes() {
    let mut data = two_by_two_icon(1);
    // info header starts right after the 22 byte directory
    data[22] = 108;

    let err = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap_err();
    assert!(matches!(err, BmpDecodeErrors::UnsupportedHeaderSize(108)));
    assert_eq!(err.kind(), DecodeErrorKind::UnsupportedVariant);
}

#[test]
fn rejects_compression_and_depth() {
    let mut data = two_by_two_icon(1);
    // compression field
    data[22 + 16] = 1;
    let err = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::UnsupportedVariant);

    let mut data = two_by_two_icon(1);
    // bit count field
    data[22 + 14] = 16;
    let err = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap_err();
    assert!(matches!(err, BmpDecodeErrors::UnsupportedDepth(16)));
}

#[test]
fn rejects_oversized_palette() {
    let mut dib = info_header(1, 1, 8, 257);
    dib.extend_from_slice(&[0; 64]);

    let data = directory(
        1,
        &[Entry {
            width: 1,
            height: 1,
            colors: 0,
            planes: 1,
            bit_count: 8,
            dib
        }]
    );
    let err = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap_err();
    assert!(matches!(err, BmpDecodeErrors::TooManyColors(257)));
    assert_eq!(err.kind(), DecodeErrorKind::MalformedData);
}

#[test]
fn truncated_icon_restores_position() {
    let mut data = vec![0xAA; 3];
    let icon = two_by_two_icon(1);
    // drop the last mask row
    data.extend_from_slice(&icon[..icon.len() - 4]);

    let mut cursor = ByteCursor::new(&data);
    cursor.byte_seek(ByteSeek::Start(3)).unwrap();

    let err = BmpDecoder::new(&mut cursor).decode().unwrap_err();

    assert_eq!(err.kind(), DecodeErrorKind::Truncated);
    assert_eq!(cursor.position(), 3);
}

#[test]
fn icon_after_prefix_decodes() {
    // directory offsets are relative to where the directory starts
    let mut data = vec![0x55; 5];
    data.extend_from_slice(&two_by_two_icon(1));

    let mut cursor = ByteCursor::new(&data);
    cursor.byte_seek(ByteSeek::Start(5)).unwrap();

    let mut decoder = BmpDecoder::new(&mut cursor);
    assert!(decoder.detect());
    let image = decoder.decode().unwrap();
    assert_eq!(image.row(1).unwrap(), &[255, 255, 255, 255, 0, 0, 0, 255]);
}

#[test]
fn headers_expose_entries() {
    let data = two_by_two_icon(2);
    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));

    assert_eq!(decoder.dimensions(), None);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    assert_eq!(decoder.depth(), Some(1));
    assert_eq!(decoder.hotspot(), Some(Hotspot { x: 5, y: 7 }));
    assert_eq!(decoder.icon_entries()[0].bytes_in_res, 64);
}
