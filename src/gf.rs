//! GF(16) field arithmetic: 4-bit symbols over the primitive polynomial
//! x^4 + x + 1 (19), generator 2.
//!
//! Mirrors the log/exp table construction used by classic Reed-Solomon
//! references (see `rs2::gf` for the byte-wide GF(256) analogue this
//! crate's Reed-Solomon layer is otherwise ported from), sized down to
//! 4-bit symbols.

use std::sync::OnceLock;

/// Primitive polynomial for GF(16): x^4 + x + 1.
const PRIME: u32 = 19;
/// Generator element.
pub const GEN: u8 = 2;
/// Symbol mask (4 bits).
const MASK: u8 = 0x0f;

struct Tables {
    /// Double-length so `exp[log a + log b]` never needs a modulo when the
    /// sum is < 30.
    exp: [u8; 32],
    log: [u8; 16],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 32];
        let mut log = [0u8; 16];
        let mut x: u32 = 1;
        for i in 0..15 {
            exp[i] = (x & MASK as u32) as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x110 != 0 {
                x ^= PRIME;
            }
        }
        for i in 15..32 {
            exp[i] = exp[i - 15];
        }
        Tables { exp, log }
    })
}

/// Addition and subtraction are the same operation in GF(2^n): XOR.
pub fn add_sub(a: u8, b: u8) -> u8 {
    (a ^ b) & MASK
}

/// Multiply two field elements.
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    t.exp[(t.log[a as usize] as usize + t.log[b as usize] as usize) % 15]
}

/// Divide `a` by `b`. Caller must not pass `b == 0`.
pub fn div(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    t.exp[(t.log[a as usize] as usize + 15 - t.log[b as usize] as usize) % 15]
}

/// Raise `n` to the power `p`. Caller must not pass `n == 0`.
pub fn pow(n: u8, p: i32) -> u8 {
    let t = tables();
    let lg = t.log[n as usize] as i32;
    let e = (lg * p).rem_euclid(15) as usize;
    t.exp[e]
}

/// Multiplicative inverse of `n`. Caller must not pass `n == 0`.
pub fn inverse(n: u8) -> u8 {
    let t = tables();
    t.exp[15 - t.log[n as usize] as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_commutative_and_xor() {
        for a in 0u8..16 {
            for b in 0u8..16 {
                assert_eq!(add_sub(a, b), add_sub(b, a));
                assert_eq!(add_sub(a, b), a ^ b);
            }
        }
    }

    #[test]
    fn mul_zero_is_absorbing() {
        for a in 0u8..16 {
            assert_eq!(mul(a, 0), 0);
            assert_eq!(mul(0, a), 0);
        }
    }

    #[test]
    fn mul_by_inverse_is_one() {
        for a in 1u8..16 {
            assert_eq!(mul(a, inverse(a)), 1);
        }
    }

    #[test]
    fn mul_is_associative() {
        for a in 1u8..16 {
            for b in 1u8..16 {
                for c in 1u8..16 {
                    assert_eq!(mul(mul(a, b), c), mul(a, mul(b, c)));
                }
            }
        }
    }

    #[test]
    fn div_undoes_mul() {
        for a in 1u8..16 {
            for b in 1u8..16 {
                assert_eq!(div(mul(a, b), b), a);
            }
        }
    }

    #[test]
    fn pow_matches_repeated_mul() {
        for n in 1u8..16 {
            let mut acc = 1u8;
            for p in 0..15 {
                assert_eq!(pow(n, p), acc);
                acc = mul(acc, n);
            }
        }
    }
}
