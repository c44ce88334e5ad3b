//! The two disjoint 16-glyph alphabets used for printable codes, plus
//! glyph normalization and display formatting (spec.md §4.4, §4.7, §6).

/// Symbols at even positions (0, 2, 4, ...) are drawn from this set;
/// index == symbol value.
pub const ODD_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '6', '7', '8', '9', 'b', 'G', 'J', 'N', 'q', 'X', 'Y', 'Z',
];

/// Symbols at odd positions (1, 3, 5, ...) are drawn from this set;
/// index == symbol value.
pub const EVEN_ALPHABET: [char; 16] = [
    '4', '5', 'A', 'C', 'D', 'E', 'F', 'H', 'K', 'M', 'P', 'R', 's', 'T', 'V', 'W',
];

/// Error sentinel emitted for an out-of-range symbol; should never occur
/// with a correct codec.
pub const ERROR_SENTINEL: char = '~';

/// Characters accepted as separators on input and ignored.
fn is_space_like(c: char) -> bool {
    matches!(c, ' ' | '-' | '.' | '_' | '+' | '*' | '#')
}

/// Upper-case letters by clearing the ASCII 0x20 bit, then re-lowercase
/// the glyphs that are canonically lower-case in our alphabets. Returns
/// `None` for space-like characters, which callers should skip.
///
/// The 0x20 bit is only cleared on `A-Za-z`: clearing it
/// unconditionally on every byte (as a literal reading of the case-fold
/// trick would do) also mangles digits and several separator
/// characters, since `'0'..='9'` and `'@'`/`' '` etc. have that bit set
/// too, into control characters that match neither alphabet.
///
/// Ambiguity correction (`O->0`, `L/I->1`, `U->V`) is deliberately NOT
/// applied here: it only happens in the main decode pass, not in the
/// pre-scan used to count valid characters (see `repair::prescan`).
pub fn normalize_case(c: char) -> Option<char> {
    if !c.is_ascii() {
        return Some(c);
    }
    let upper = if c.is_ascii_alphabetic() {
        ((c as u8) & 0xDF) as char
    } else {
        c
    };
    if is_space_like(upper) {
        return None;
    }
    Some(case_changes(upper))
}

fn case_changes(c: char) -> char {
    match c {
        'B' => 'b',
        'Q' => 'q',
        'S' => 's',
        other => other,
    }
}

/// Remap glyphs commonly mis-transcribed for each other.
pub fn correct_ambiguous(c: char) -> char {
    match c {
        'O' => '0',
        'L' | 'I' => '1',
        'U' => 'V',
        other => other,
    }
}

/// Outcome of looking a normalized glyph up in both alphabets.
pub enum Lookup {
    /// Not a member of either alphabet.
    Unknown,
    /// A member of exactly one alphabet: symbol value and chirality
    /// (0 = odd alphabet, 1 = even alphabet).
    Found { value: u8, chirality: u8 },
    /// Matched both alphabets. Cannot happen by construction since the
    /// two alphabets are disjoint; surfaced so callers can treat it as
    /// the structural error spec.md §7 describes.
    Ambiguous,
}

/// Look up a normalized (case-folded, ambiguity-corrected) glyph.
pub fn lookup(c: char) -> Lookup {
    let odd = ODD_ALPHABET.iter().position(|&g| g == c);
    let even = EVEN_ALPHABET.iter().position(|&g| g == c);
    match (odd, even) {
        (Some(_), Some(_)) => Lookup::Ambiguous,
        (Some(i), None) => Lookup::Found {
            value: i as u8,
            chirality: 0,
        },
        (None, Some(i)) => Lookup::Found {
            value: i as u8,
            chirality: 1,
        },
        (None, None) => Lookup::Unknown,
    }
}

/// Map a symbol value and its codeword position to the glyph that
/// represents it.
pub fn encode_char(value: u8, position: usize) -> char {
    if value > 15 {
        return ERROR_SENTINEL;
    }
    if position % 2 == 0 {
        ODD_ALPHABET[value as usize]
    } else {
        EVEN_ALPHABET[value as usize]
    }
}

/// Render a full codeword as a printable string, injecting separators
/// for readability: `-` every 4 positions, ` ` at the other even
/// positions (never before position 0).
pub fn format(codeword: &[u8]) -> String {
    let mut out = String::with_capacity(codeword.len() * 2);
    for (i, &v) in codeword.iter().enumerate() {
        if i > 0 {
            if i % 4 == 0 {
                out.push('-');
            } else if i % 2 == 0 {
                out.push(' ');
            }
        }
        out.push(encode_char(v, i));
    }
    out
}
