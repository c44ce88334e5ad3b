//! Encode short binary payloads into compact, human-transcribable
//! alphanumeric strings, and decode them back while tolerating the
//! kinds of damage that creep in when a human types a code by hand:
//! missing characters, extra characters, adjacent transpositions, and
//! ambiguous-glyph substitutions (`O`/`0`, `I`/`L`/`1`, `U`/`V`).
//!
//! The codec is a GF(16) Reed-Solomon code wrapped in a transcription-
//! repair layer that uses *chirality* -- the parity of a symbol's
//! position, redundantly encoded by which of two disjoint alphabets its
//! glyph is drawn from -- to localize and undo that kind of damage
//! before handing the repaired symbol stream to the Reed-Solomon
//! decoder.
//!
//! Not a cryptographic integrity mechanism: it corrects accidental
//! corruption, not adversarial tampering.

mod alphabet;
mod error;
mod gf;
mod nybble;
mod poly;
mod repair;
mod rs;

pub use error::MultiCodeError;

/// Largest total codeword length (`2 * data_len + correction_symbols`)
/// the classical single-block Reed-Solomon scheme supports over GF(16):
/// the field has only 15 nonzero elements, so the Chien search in
/// `rs::find_error_positions` (one candidate root per nonzero field
/// element) cannot place more than 15 symbols without aliasing two
/// positions onto the same root.
const MAX_CODEWORD_SYMBOLS: usize = 15;

fn check_bound(data_len: usize, correction_symbols: usize) -> Result<(), MultiCodeError> {
    let total = 2 * data_len + correction_symbols;
    if total > MAX_CODEWORD_SYMBOLS {
        return Err(MultiCodeError::InvalidInput(format!(
            "2 * data_len + correction_symbols ({total}) exceeds the GF(16) block bound of {MAX_CODEWORD_SYMBOLS}"
        )));
    }
    Ok(())
}

/// Encode `data` into a printable, transcription-tolerant string using
/// `correction_symbols` Reed-Solomon check symbols.
///
/// `data` must be non-empty, and `2 * data.len() + correction_symbols`
/// must not exceed [`MAX_CODEWORD_SYMBOLS`].
pub fn encode(data: &[u8], correction_symbols: usize) -> Result<String, MultiCodeError> {
    if data.is_empty() {
        return Err(MultiCodeError::InvalidInput(
            "data must be at least one byte".into(),
        ));
    }
    check_bound(data.len(), correction_symbols)?;

    let payload = nybble::bytes_to_nybbles(data);
    let codeword = rs::encode(&payload, correction_symbols);
    Ok(alphabet::format(&codeword))
}

/// Decode a printable code produced by [`encode`] back into
/// `data_len` bytes, tolerating the transcription damage described in
/// the module docs.
///
/// `data_len` and `correction_symbols` must match the values `encode`
/// was called with; the decoder has no way to recover them from the
/// code itself.
pub fn decode(
    code: &str,
    data_len: usize,
    correction_symbols: usize,
) -> Result<Vec<u8>, MultiCodeError> {
    if data_len < 1 {
        return Err(MultiCodeError::InvalidInput(
            "data_len must be positive".into(),
        ));
    }
    check_bound(data_len, correction_symbols)?;
    let expected_len = data_len * 2 + correction_symbols;

    let repaired = repair::decode_display(expected_len, code)?;
    if repaired.codes.len() != expected_len {
        return Err(MultiCodeError::StructuralMismatch);
    }

    let decoded = rs::try_hard_decode(&repaired.codes, correction_symbols, expected_len);
    let mut symbols = decoded.codeword.ok_or(MultiCodeError::Uncorrectable)?;

    symbols.truncate(symbols.len() - correction_symbols);
    Ok(nybble::nybbles_to_bytes(&symbols))
}
