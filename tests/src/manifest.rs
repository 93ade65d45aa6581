/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::HashMap;
use std::fs::read;
use std::path::Path;

use relic_core::bytestream::ByteCursor;
use relic_core::options::DecoderOptions;

use crate::{fixtures, image_hash, TestEntry};

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_fixtures() {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures.json");

    let json_file = read(file).unwrap();

    let entries: Vec<TestEntry> = serde_json::from_slice(&json_file).unwrap();

    let mut hashes = HashMap::new();
    let mut error = false;
    let mut failed = Vec::new();

    for entry in &entries {
        let (format, data) = fixtures::by_name(&entry.name)
            .unwrap_or_else(|| panic!("No fixture named {}", entry.name));

        assert_eq!(format, entry.format, "{}", entry.name);

        let image = format
            .decode(&mut ByteCursor::new(&data), DecoderOptions::default())
            .unwrap();

        let found = (
            image.width(),
            image.height(),
            format!("{:?}", image.pixel_format())
        );
        let expected = (entry.width, entry.height, entry.pixel_format.clone());

        if found != expected {
            error = true;
            failed.push(entry.to_owned());
            eprintln!(
                "Layout mismatch for {}\nExpected {:?} but found {:?}\n",
                entry.name, expected, found
            );
        }
        hashes.insert(entry.name.clone(), image_hash(&image));
    }
    for entry in &entries {
        if let Some(other) = &entry.same_as {
            let expected = hashes[other];
            let found = hashes[&entry.name];

            if expected != found {
                error = true;
                failed.push(entry.to_owned());
                eprintln!(
                    "Hash mismatch for {}\nExpected the pixels of {} ({}) but found {}\n",
                    entry.name, other, expected, found
                );
            }
        }
    }
    if error {
        panic!("Errors found during test decoding\n {:#?}", failed);
    }
}
