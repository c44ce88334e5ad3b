//! Transcription repair layer (spec.md §4.4): turns a possibly mangled
//! printable code into a plausible symbol stream before handing it to
//! the Reed-Solomon decoder.

use crate::alphabet::{self, Lookup};
use crate::error::MultiCodeError;

/// Output of [`decode_display`]: the repaired symbol stream, plus an
/// informational log of positions the repair loop touched. The log is
/// not consumed by the Reed-Solomon decoder.
pub struct Repaired {
    pub codes: Vec<u8>,
    pub transposes: Vec<usize>,
}

/// Count how many input characters normalize into either alphabet,
/// WITHOUT applying ambiguity correction (`O->0` etc). This mirrors the
/// original implementation, where the pre-scan and the main decode pass
/// disagree on whether ambiguous glyphs count as "valid" -- the main
/// pass still accepts them via `alphabet::correct_ambiguous`, so this
/// under-count only affects how many placeholder/skip decisions the
/// main pass makes, not whether ambiguous glyphs are ultimately parsed.
fn prescan_valid_count(input: &str) -> usize {
    input
        .chars()
        .filter_map(alphabet::normalize_case)
        .filter(|&c| !matches!(alphabet::lookup(c), Lookup::Unknown))
        .count()
}

/// Parse `input` into a symbol stream and parallel chirality stream,
/// inserting placeholder zero-symbols or skipping unrecognized
/// characters to close the gap between `input`'s valid character count
/// and `expected_len`.
fn parse_display(expected_len: usize, input: &str) -> Result<(Vec<u8>, Vec<u8>), MultiCodeError> {
    let valid_count = prescan_valid_count(input);
    let mut mismatch = expected_len as i64 - valid_count as i64;

    let mut codes = Vec::with_capacity(expected_len);
    let mut chirality = Vec::with_capacity(expected_len);
    let mut next_chirality = 0u8;

    for c in input.chars() {
        let Some(src) = alphabet::normalize_case(c) else {
            continue;
        };
        let src = alphabet::correct_ambiguous(src);

        match alphabet::lookup(src) {
            Lookup::Ambiguous => return Err(MultiCodeError::StructuralMismatch),
            Lookup::Found { value, chirality: chi } => {
                codes.push(value);
                chirality.push(chi);
                next_chirality = 1 - chi;
            }
            Lookup::Unknown => {
                if mismatch > 0 {
                    codes.push(0);
                    chirality.push(next_chirality);
                    next_chirality = 1 - next_chirality;
                    mismatch -= 1;
                } else {
                    mismatch += 1;
                }
            }
        }
    }

    Ok((codes, chirality))
}

fn find_first_chirality_error(chirality: &[u8]) -> Option<usize> {
    chirality
        .iter()
        .enumerate()
        .find(|&(i, &chi)| chi != (i as u8 & 1))
        .map(|(i, _)| i)
}

/// One iteration of the repair rule (spec.md §4.4). Returns `true` when
/// repair is complete (either successfully or because the input is too
/// damaged to safely continue), `false` to keep iterating.
fn repair_step(
    expected_len: usize,
    codes: &mut Vec<u8>,
    chirality: &mut Vec<u8>,
    transposes: &mut Vec<usize>,
) -> bool {
    let len = codes.len();
    let min_length = (2 * expected_len) / 3;
    if len < min_length {
        return true;
    }

    let first_err = find_first_chirality_error(chirality);
    if len == expected_len && first_err.is_none() {
        return true;
    }

    if len < expected_len {
        match first_err {
            None => {
                let chi = (len % 2) as u8;
                let diff = expected_len - len;
                if diff == 1 && chi != 1 {
                    codes.insert(0, 0);
                    chirality.insert(0, 0);
                    transposes.push(0);
                } else {
                    codes.push(0);
                    chirality.push(chi);
                    transposes.push(len);
                }
            }
            Some(pos) => {
                let chi = (pos % 2) as u8;
                codes.insert(pos, 0);
                chirality.insert(pos, chi);
                transposes.push(pos);
            }
        }
        return false;
    }

    if len > expected_len {
        let expected_last_chi = ((1 + expected_len) % 2) as u8;
        if *chirality.last().expect("len > expected_len >= 0 implies non-empty") != expected_last_chi {
            codes.pop();
            chirality.pop();
            return false;
        }

        let pos = first_err.unwrap_or(len - 1);
        codes.remove(pos);
        chirality.remove(pos);
        transposes.push(pos);
        return false;
    }

    // len == expected_len, but chirality disagrees somewhere: adjacent
    // transposition (or a value the Reed-Solomon layer must fix).
    let first_err = first_err.expect("handled above when first_err is None");
    if first_err >= expected_len - 1 {
        return true;
    }

    if chirality[first_err] == chirality[first_err + 1] {
        chirality[first_err] = 1 - chirality[first_err];
        transposes.push(first_err);
        return false;
    }

    codes.swap(first_err, first_err + 1);
    chirality.swap(first_err, first_err + 1);
    transposes.push(first_err);
    false
}

/// Parse and repair a printable code into a symbol stream of (hoped for)
/// length `expected_len`. Callers must still check the returned length,
/// since the repair loop may give up before reaching it.
pub fn decode_display(expected_len: usize, input: &str) -> Result<Repaired, MultiCodeError> {
    if expected_len < 1 {
        return Err(MultiCodeError::InvalidInput(
            "expected length must be positive".into(),
        ));
    }

    let (mut codes, mut chirality) = parse_display(expected_len, input)?;
    let mut transposes = Vec::new();

    for _ in 0..expected_len {
        if repair_step(expected_len, &mut codes, &mut chirality, &mut transposes) {
            break;
        }
    }

    Ok(Repaired { codes, transposes })
}
