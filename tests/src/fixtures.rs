/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Small images built byte by byte

use crate::Format;

/// Every fixture with the decoder that owns it
pub fn all() -> Vec<(&'static str, Format, Vec<u8>)> {
    vec![
        ("bmp_bottom_up_24", Format::Bmp, bmp_bottom_up_24()),
        ("bmp_top_down_24", Format::Bmp, bmp_top_down_24()),
        ("bmp_indexed_8", Format::Bmp, bmp_indexed_8()),
        ("ico_32", Format::Bmp, ico_32()),
        ("cur_1", Format::Bmp, cur_1()),
        ("ilbm_planar", Format::Ilbm, ilbm_planar()),
        ("pbm_raw", Format::Ilbm, pbm_raw()),
        ("pbm_byte_run", Format::Ilbm, pbm_byte_run()),
        ("tga_raw_24", Format::Tga, tga_raw_24()),
        ("tga_rle_24", Format::Tga, tga_rle_24()),
        ("tga_lower_24", Format::Tga, tga_lower_24()),
        ("tga_grey", Format::Tga, tga_grey())
    ]
}

/// Look a fixture up by name
pub fn by_name(name: &str) -> Option<(Format, Vec<u8>)> {
    all()
        .into_iter()
        .find(|(n, ..)| *n == name)
        .map(|(_, format, data)| (format, data))
}

// bitmaps

fn bitmap(width: i32, height: i32, bit_count: u16, palette: &[[u8; 4]], rows: &[u8]) -> Vec<u8> {
    let data_offset = 14 + 40 + palette.len() * 4;

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((data_offset + rows.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());
    out.extend_from_slice(&dib_header(width, height, bit_count, palette.len() as u32));

    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(rows);
    out
}

fn dib_header(width: i32, height: i32, bit_count: u16, clr_used: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    out.extend_from_slice(&clr_used.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out
}

const TOP_ROW_24: [u8; 8] = [7, 8, 9, 10, 11, 12, 0, 0];
const BOTTOM_ROW_24: [u8; 8] = [1, 2, 3, 4, 5, 6, 0, 0];

pub fn bmp_bottom_up_24() -> Vec<u8> {
    let rows = [BOTTOM_ROW_24, TOP_ROW_24].concat();
    bitmap(2, 2, 24, &[], &rows)
}

pub fn bmp_top_down_24() -> Vec<u8> {
    let rows = [TOP_ROW_24, BOTTOM_ROW_24].concat();
    bitmap(2, -2, 24, &[], &rows)
}

pub fn bmp_indexed_8() -> Vec<u8> {
    let palette = [[0, 0, 255, 0], [255, 0, 0, 0]];
    bitmap(2, 1, 8, &palette, &[1, 0, 0, 0])
}

fn icon_directory(icon_type: u16, planes: u16, bit_count: u16, dib: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0_u16.to_le_bytes());
    out.extend_from_slice(&icon_type.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());

    out.extend_from_slice(&[2, 2, 0, 0]);
    out.extend_from_slice(&planes.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    out.extend_from_slice(&(dib.len() as u32).to_le_bytes());
    out.extend_from_slice(&22_u32.to_le_bytes());
    out.extend_from_slice(dib);
    out
}

pub fn ico_32() -> Vec<u8> {
    // stored height counts the mask rows too
    let mut dib = dib_header(2, 4, 32, 0);
    dib.extend_from_slice(&[10, 20, 30, 40, 50, 60, 70, 80]);
    dib.extend_from_slice(&[15, 25, 35, 45, 55, 65, 75, 85]);
    // mask leaves every pixel visible
    dib.extend_from_slice(&[0; 8]);
    icon_directory(1, 1, 32, &dib)
}

pub fn cur_1() -> Vec<u8> {
    let mut dib = dib_header(2, 4, 1, 2);
    dib.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
    dib.extend_from_slice(&[0x80, 0, 0, 0]);
    dib.extend_from_slice(&[0x40, 0, 0, 0]);
    // top left pixel is masked
    dib.extend_from_slice(&[0x00, 0, 0, 0]);
    dib.extend_from_slice(&[0x80, 0, 0, 0]);
    // hotspot at (1, 1)
    icon_directory(2, 1, 1, &dib)
}

// interchange file format

fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn bmhd(width: u16, height: u16, planes: u8, compression: u8) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&[planes, 0, compression, 0]);
    out.extend_from_slice(&0_u16.to_be_bytes());
    out.extend_from_slice(&[1, 1]);
    out.extend_from_slice(&320_i16.to_be_bytes());
    out.extend_from_slice(&200_i16.to_be_bytes());
    chunk(b"BMHD", &out)
}

fn form(kind: &[u8; 4], header: Vec<u8>, body: &[u8]) -> Vec<u8> {
    let mut inner = Vec::new();
    inner.extend_from_slice(kind);
    inner.extend_from_slice(&header);
    inner.extend_from_slice(&chunk(b"CMAP", &[0, 0, 0, 255, 255, 255]));
    inner.extend_from_slice(&chunk(b"BODY", body));

    let mut out = Vec::new();
    out.extend_from_slice(b"FORM");
    out.extend_from_slice(&(inner.len() as u32).to_be_bytes());
    out.extend_from_slice(&inner);
    out
}

pub fn ilbm_planar() -> Vec<u8> {
    form(
        b"ILBM",
        bmhd(4, 1, 2, 0),
        &[0b1010_0000, 0, 0b0101_0000, 0]
    )
}

pub fn pbm_raw() -> Vec<u8> {
    let mut body = [0_u8; 16];
    body[..4].copy_from_slice(&[0, 1, 1, 0]);
    form(b"PBM ", bmhd(4, 1, 8, 0), &body)
}

pub fn pbm_byte_run() -> Vec<u8> {
    // four literals then twelve zeros
    form(b"PBM ", bmhd(4, 1, 8, 1), &[3, 0, 1, 1, 0, 0xF5, 0])
}

// targa

fn targa(image_type: u8, width: u16, height: u16, depth: u8, descriptor: u8, data: &[u8]) -> Vec<u8> {
    let mut out = vec![0, 0, image_type];
    out.extend_from_slice(&[0; 9]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&[depth, descriptor]);
    out.extend_from_slice(data);
    out
}

const TGA_TOP_ROW: [u8; 9] = [1, 1, 1, 2, 2, 2, 3, 3, 3];
const TGA_BOTTOM_ROW: [u8; 9] = [3, 3, 3, 3, 3, 3, 4, 4, 4];

pub fn tga_raw_24() -> Vec<u8> {
    targa(2, 3, 2, 24, 0x20, &[TGA_TOP_ROW, TGA_BOTTOM_ROW].concat())
}

pub fn tga_lower_24() -> Vec<u8> {
    targa(2, 3, 2, 24, 0, &[TGA_BOTTOM_ROW, TGA_TOP_ROW].concat())
}

pub fn tga_rle_24() -> Vec<u8> {
    let packets = [
        0x01, 1, 1, 1, 2, 2, 2, //
        0x82, 3, 3, 3, //
        0x00, 4, 4, 4
    ];
    targa(10, 3, 2, 24, 0x20, &packets)
}

pub fn tga_grey() -> Vec<u8> {
    targa(3, 2, 1, 8, 0x20, &[7, 200])
}
