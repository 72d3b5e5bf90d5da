//! 12-bit LZW codec
//!
//! Fixed code width, no clear code, no stop code: the dictionary simply
//! freezes once it reaches [`DICT_CAP`] entries and the remainder of the
//! block is coded against the frozen table. A fresh dictionary is built for
//! every block, so encoder and decoder state never survives past one call.
//!
//! The encoder dictionary is a trie keyed by `(prefix_code, next_byte)`,
//! mapping each observed (known string, next byte) pair straight to the code
//! that names the extended string, with no clear or stop codes to special-case.
//! The decoder dictionary is a plain `Vec<Vec<u8>>` indexed by code.

use std::collections::HashMap;

use crate::Error;

/// One past the highest code the table may hold (2^12).
pub const DICT_CAP: usize = 4096;

/// Encode `data` into a sequence of 12-bit codes, written into `codes`
/// (cleared first). Never fails: every byte string has some valid coding.
pub fn encode(data: &[u8], codes: &mut Vec<u16>) {
    codes.clear();
    if data.is_empty() {
        return;
    }
    log::trace!("encoding block of {} bytes", data.len());
    let mut table: HashMap<(u16, u8), u16> = HashMap::new();
    let mut next_code: u16 = 256;

    // w is tracked as the code of the longest known prefix, not the bytes
    // themselves. Seeding it with the first byte and iterating from the
    // second is the encoder-side half of the fixed point described in
    // the codec contract: both formulations of the initial prefix check
    // must agree with the decoder's own initialization.
    let mut w_code = data[0] as u16;
    for &c in &data[1..] {
        match table.get(&(w_code, c)) {
            Some(&code) => w_code = code,
            None => {
                codes.push(w_code);
                if next_code < DICT_CAP as u16 {
                    table.insert((w_code, c), next_code);
                    next_code += 1;
                }
                w_code = c as u16;
            }
        }
    }
    codes.push(w_code);
    log::trace!("block emitted {} codes", codes.len());
}

/// Decode a sequence of codes produced by [`encode`], appending the
/// reconstructed bytes into `out` (cleared first).
pub fn decode(codes: &[u16], out: &mut Vec<u8>) -> Result<(), Error> {
    out.clear();
    if codes.is_empty() {
        return Ok(());
    }
    let mut table: Vec<Vec<u8>> = (0u16..256).map(|b| vec![b as u8]).collect();

    let c0 = codes[0];
    if c0 as usize >= 256 {
        log::error!("first code {c0} is not a literal");
        return Err(Error::DecodeError);
    }
    let mut w = table[c0 as usize].clone();
    out.extend_from_slice(&w);

    for &code in &codes[1..] {
        let entry = if (code as usize) < table.len() {
            table[code as usize].clone()
        } else if code as usize == table.len() {
            // KwKwK case: the code names the entry that is about to be
            // created, so synthesize it as the previous output plus its
            // own first byte.
            let mut e = w.clone();
            e.push(w[0]);
            e
        } else {
            log::error!("code {code} exceeds dictionary size {}", table.len());
            return Err(Error::DecodeError);
        };
        out.extend_from_slice(&entry);
        if table.len() < DICT_CAP {
            let mut new_entry = w.clone();
            new_entry.push(entry[0]);
            table.push(new_entry);
        }
        w = entry;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_example() {
        // Wikipedia's canonical LZW walkthrough, adapted to the 12-bit
        // fixed-width coding used here (no clear/stop codes).
        let data = b"TOBEORNOTTOBEORTOBEORNOT#";
        let mut codes = Vec::new();
        encode(data, &mut codes);
        let expected: Vec<u16> = vec![
            b'T' as u16,
            b'O' as u16,
            b'B' as u16,
            b'E' as u16,
            b'O' as u16,
            b'R' as u16,
            b'N' as u16,
            b'O' as u16,
            b'T' as u16,
            256,
            258,
            260,
            265,
            259,
            261,
            263,
            b'#' as u16,
        ];
        assert_eq!(codes, expected);
        assert_eq!(codes.len(), 17);
    }

    #[test]
    fn empty_input_emits_no_codes() {
        let mut codes = vec![1, 2, 3];
        encode(b"", &mut codes);
        assert!(codes.is_empty());
    }

    #[test]
    fn single_byte_input_emits_one_code() {
        let mut codes = Vec::new();
        encode(b"x", &mut codes);
        assert_eq!(codes, vec![b'x' as u16]);
    }

    #[test]
    fn round_trip_arbitrary_text() {
        let data = b"I am Sam. Sam I am. I do not like this Sam I am.\n";
        let mut codes = Vec::new();
        encode(data, &mut codes);
        let mut back = Vec::new();
        decode(&codes, &mut back).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn round_trip_empty() {
        let mut codes = Vec::new();
        encode(b"", &mut codes);
        let mut back = Vec::new();
        decode(&codes, &mut back).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn dictionary_never_exceeds_cap_on_highly_repetitive_input() {
        let data = vec![0x41u8; 16384];
        let mut codes = Vec::new();
        encode(&data, &mut codes);
        assert!(codes.len() < data.len());
        let mut back = Vec::new();
        decode(&codes, &mut back).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn decode_rejects_non_literal_first_code() {
        let mut out = Vec::new();
        assert!(matches!(decode(&[300], &mut out), Err(Error::DecodeError)));
    }

    #[test]
    fn decode_rejects_code_beyond_kwkwk_successor() {
        // First code is a valid literal, second jumps far past the
        // one legal "new" code (dictionary size is 257 at that point).
        let mut out = Vec::new();
        assert!(matches!(
            decode(&[b'a' as u16, 4000], &mut out),
            Err(Error::DecodeError)
        ));
    }

    #[test]
    fn incompressible_input_round_trips() {
        // Deterministic pseudo-random bytes; no fixed seed crate needed
        // since only round-trip correctness is asserted, not compression
        // ratio.
        let mut data = vec![0u8; 4096];
        let mut state: u32 = 0x2545F491;
        for b in data.iter_mut() {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *b = (state & 0xFF) as u8;
        }
        let mut codes = Vec::new();
        encode(&data, &mut codes);
        let mut back = Vec::new();
        decode(&codes, &mut back).unwrap();
        assert_eq!(back, data);
    }
}
