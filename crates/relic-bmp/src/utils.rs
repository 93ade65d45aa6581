/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Split packed 1, 4 or 8 bit indices into one byte per pixel
///
/// Leftmost pixels live in the most significant bits. Stops when either
/// `out` is full or `input` runs out.
pub(crate) fn expand_bits_to_byte(depth: usize, input: &[u8], out: &mut [u8]) {
    match depth {
        1 => {
            // process in batches of 8, the remainder is handled after
            let mut out_iter = out.chunks_exact_mut(8);
            let mut in_iter = input.iter();

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, in_val)| {
                    for (pos, out_val) in out_vals.iter_mut().enumerate() {
                        *out_val = (in_val >> (7 - pos)) & 0x01;
                    }
                });

            if let Some(in_val) = in_iter.next() {
                let remainder = out_iter.into_remainder();
                for (pos, out_val) in remainder.iter_mut().enumerate() {
                    *out_val = (in_val >> (7 - pos)) & 0x01;
                }
            }
        }
        4 => {
            let mut out_iter = out.chunks_exact_mut(2);
            let mut in_iter = input.iter();

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, in_val)| {
                    out_vals[0] = in_val >> 4;
                    out_vals[1] = in_val & 0x0F;
                });

            if let Some(in_val) = in_iter.next() {
                if let Some(last) = out_iter.into_remainder().first_mut() {
                    *last = in_val >> 4;
                }
            }
        }
        8 => {
            let count = out.len().min(input.len());
            out[..count].copy_from_slice(&input[..count]);
        }
        _ => {}
    }
}

/// Bytes in a DIB row of `width` pixels at `depth` bits, padded to four bytes
pub(crate) fn padded_row_size(width: usize, depth: usize) -> Option<usize> {
    let bits = width.checked_mul(depth)?;
    let bytes = bits.checked_add(7)? / 8;

    Some(bytes.checked_add(3)? & !3)
}
