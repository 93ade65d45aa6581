/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Palette table shared by indexed formats
//!
//! A palette is an ordered list of at most 256 RGB entries, the position
//! of an entry is the pixel value that selects it.
use alloc::vec::Vec;

use crate::errors::PaletteErrors;

/// Maximum number of entries a palette can hold
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// A single RGB color of a palette
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PaletteEntry {
    pub red:   u8,
    pub green: u8,
    pub blue:  u8
}

impl PaletteEntry {
    pub const fn new(red: u8, green: u8, blue: u8) -> PaletteEntry {
        PaletteEntry { red, green, blue }
    }

    /// The same color with every channel halved
    pub const fn half_bright(self) -> PaletteEntry {
        PaletteEntry {
            red:   self.red >> 1,
            green: self.green >> 1,
            blue:  self.blue >> 1
        }
    }
}

/// An ordered table of up to 256 colors
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>
}

impl Palette {
    /// Create an empty palette
    pub const fn new() -> Palette {
        Palette {
            entries: Vec::new()
        }
    }

    /// Create a palette of `len` black entries
    pub fn with_len(len: usize) -> Result<Palette, PaletteErrors> {
        if len > MAX_PALETTE_ENTRIES {
            return Err(PaletteErrors::TooManyEntries(len));
        }
        let mut entries = Vec::with_capacity(len);
        entries.resize(len, PaletteEntry::default());

        Ok(Palette { entries })
    }

    pub fn from_entries(entries: &[PaletteEntry]) -> Result<Palette, PaletteErrors> {
        if entries.len() > MAX_PALETTE_ENTRIES {
            return Err(PaletteErrors::TooManyEntries(entries.len()));
        }
        Ok(Palette {
            entries: entries.to_vec()
        })
    }

    /// A 256 entry ramp where entry `i` is the grey `(i, i, i)`
    pub fn greyscale_ramp() -> Palette {
        let entries = (0..=255_u8).map(|i| PaletteEntry::new(i, i, i)).collect();

        Palette { entries }
    }

    /// A ramp of `levels` greys spread evenly from black to white
    ///
    /// `levels` is clamped to `2..=256`
    pub fn greyscale_levels(levels: usize) -> Palette {
        let levels = levels.clamp(2, MAX_PALETTE_ENTRIES);
        let top = levels - 1;

        let entries = (0..levels)
            .map(|i| {
                let v = ((i * 255) / top) as u8;
                PaletteEntry::new(v, v, v)
            })
            .collect();

        Palette { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<PaletteEntry> {
        self.entries.get(index).copied()
    }

    /// Replace the entry at `index`
    pub fn set(&mut self, index: usize, entry: PaletteEntry) -> Result<(), PaletteErrors> {
        let len = self.entries.len();

        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(PaletteErrors::OutOfBounds(index, len))
        }
    }

    /// Append an entry, failing once the table holds 256 colors
    pub fn push(&mut self, entry: PaletteEntry) -> Result<(), PaletteErrors> {
        if self.entries.len() >= MAX_PALETTE_ENTRIES {
            return Err(PaletteErrors::TooManyEntries(self.entries.len() + 1));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Extra-half-bright expansion
    ///
    /// Entries 32..64 become entries 0..32 with every channel halved.
    /// Entries missing from the first 32 are taken as black.
    pub fn extend_half_bright(&mut self) {
        if self.entries.len() < 64 {
            self.entries.resize(64, PaletteEntry::default());
        }

        for i in 0..32 {
            self.entries[i + 32] = self.entries[i].half_bright();
        }
    }

    /// Grow the table to `target` entries by repeating the existing
    /// entries in order, entry `i` becomes entry `i % len`.
    ///
    /// Does nothing when the table is empty or already large enough.
    /// `target` is clamped to 256.
    pub fn pad_repeating(&mut self, target: usize) {
        let target = target.min(MAX_PALETTE_ENTRIES);
        let real = self.entries.len();

        if real == 0 || real >= target {
            return;
        }
        for i in real..target {
            let entry = self.entries[i % real];
            self.entries.push(entry);
        }
    }
}
