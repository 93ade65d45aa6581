/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::thread;

use relic_bmp::BmpDecoder;
use relic_core::bytestream::{ByteCursor, ByteReaderTrait, ByteSeek};
use relic_core::errors::DecodeErrorKind;
use relic_core::options::DecoderOptions;
use relic_ilbm::IlbmDecoder;
use relic_tga::TgaDecoder;

use crate::{fixtures, image_hash, Format};

const PREFIX: usize = 3;

/// `data` behind a few junk bytes, with the cursor already past them
fn after_prefix(data: &[u8]) -> ByteCursor<Vec<u8>> {
    let mut contents = vec![0x5A; PREFIX];
    contents.extend_from_slice(data);

    let mut cursor = ByteCursor::new(contents);
    cursor.byte_seek(ByteSeek::Start(PREFIX as u64)).unwrap();
    cursor
}

#[test]
fn detect_does_not_move_the_stream() {
    for (name, owner, data) in fixtures::all() {
        for format in Format::ALL {
            let mut cursor = after_prefix(&data);
            let detected = format.detect(&mut cursor);

            assert_eq!(cursor.position(), PREFIX, "{name} with {format:?}");
            assert_eq!(detected, format == owner, "{name} with {format:?}");
        }
    }
}

#[test]
fn owner_decodes_after_prefix() {
    for (name, owner, data) in fixtures::all() {
        let plain = owner
            .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
            .unwrap();
        let shifted = owner
            .decode(&mut after_prefix(&data), DecoderOptions::default())
            .unwrap();

        assert_eq!(image_hash(&plain), image_hash(&shifted), "{name}");
    }
}

#[test]
fn decoders_reject_each_other() {
    for (name, owner, data) in fixtures::all() {
        for format in Format::ALL.into_iter().filter(|f| *f != owner) {
            let mut cursor = after_prefix(&data);
            let result = format.decode(&mut cursor, DecoderOptions::default());

            assert!(result.is_err(), "{name} decoded by {format:?}");
            assert_eq!(cursor.position(), PREFIX, "{name} with {format:?}");
        }
    }
}

#[test]
fn truncation_restores_position() {
    for (name, owner, data) in fixtures::all() {
        let mut cursor = after_prefix(&data[..data.len() / 2]);
        let err = owner
            .decode(&mut cursor, DecoderOptions::default())
            .unwrap_err();

        assert_eq!(err, DecodeErrorKind::Truncated, "{name}");
        assert_eq!(cursor.position(), PREFIX, "{name}");
    }
}

#[test]
fn limits_restore_position() {
    let options = DecoderOptions::default()
        .set_max_width(1)
        .set_max_height(1);

    for (name, owner, data) in fixtures::all() {
        let mut cursor = after_prefix(&data);
        let err = owner.decode(&mut cursor, options).unwrap_err();

        assert_eq!(err, DecodeErrorKind::MalformedData, "{name}");
        assert_eq!(cursor.position(), PREFIX, "{name}");
    }
}

#[test]
fn decoding_is_idempotent() {
    for (name, owner, data) in fixtures::all() {
        let first = owner
            .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
            .unwrap();
        let second = owner
            .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
            .unwrap();

        assert_eq!(image_hash(&first), image_hash(&second), "{name}");
        assert_eq!(first.color_key(), second.color_key(), "{name}");
        assert_eq!(first.hotspot(), second.hotspot(), "{name}");
    }
}

#[test]
fn headers_then_decode_matches_decode() {
    let data = fixtures::tga_rle_24();
    let direct = TgaDecoder::new(ByteCursor::new(&data)).decode().unwrap();

    let mut decoder = TgaDecoder::new(ByteCursor::new(&data));
    decoder.decode_headers().unwrap();
    let staged = decoder.decode().unwrap();
    assert_eq!(image_hash(&direct), image_hash(&staged));

    let data = fixtures::ilbm_planar();
    let direct = IlbmDecoder::new(ByteCursor::new(&data)).decode().unwrap();

    let mut decoder = IlbmDecoder::new(ByteCursor::new(&data));
    decoder.decode_headers().unwrap();
    let staged = decoder.decode().unwrap();
    assert_eq!(image_hash(&direct), image_hash(&staged));

    let data = fixtures::cur_1();
    let direct = BmpDecoder::new(ByteCursor::new(&data)).decode().unwrap();

    let mut decoder = BmpDecoder::new(ByteCursor::new(&data));
    decoder.decode_headers().unwrap();
    let staged = decoder.decode().unwrap();
    assert_eq!(image_hash(&direct), image_hash(&staged));
    assert_eq!(direct.hotspot(), staged.hotspot());
}

#[test]
fn concurrent_decodes_agree() {
    let expected: Vec<u128> = fixtures::all()
        .into_iter()
        .map(|(_, owner, data)| {
            let image = owner
                .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
                .unwrap();
            image_hash(&image)
        })
        .collect();

    let handles: Vec<_> = fixtures::all()
        .into_iter()
        .map(|(_, owner, data)| {
            thread::spawn(move || {
                let image = owner
                    .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
                    .unwrap();
                image_hash(&image)
            })
        })
        .collect();

    let found: Vec<u128> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(expected, found);
}
