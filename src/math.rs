//! Modular arithmetic and strict decimal parsing

use anyhow::{anyhow, bail, Result};
use num_bigint::{BigInt, BigUint};
use num_traits::{Num, One, Signed, Zero};

use crate::error::MathError;

/// secp256k1 curve order n in hexadecimal.
pub const SECP256K1_ORDER_HEX: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

/// Returns the secp256k1 group order as a `BigUint`.
pub fn secp256k1_order() -> BigUint {
    BigUint::from_str_radix(SECP256K1_ORDER_HEX, 16)
        .expect("SECP256K1_ORDER_HEX should parse as base-16")
}

/// Computes the multiplicative inverse of `a` modulo `n` with the extended
/// Euclidean algorithm.
///
/// Returns the unique `t` in `[0, n)` with `a * t ≡ 1 (mod n)`, or
/// [`MathError::InverseNotFound`] when `gcd(a, n) > 1`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint, MathError> {
    let mut t = BigInt::zero();
    let mut new_t = BigInt::one();
    let mut r = BigInt::from(n.clone());
    let mut new_r = BigInt::from(a.clone());

    while !new_r.is_zero() {
        let quotient = &r / &new_r;
        let next_t = &t - &quotient * &new_t;
        t = std::mem::replace(&mut new_t, next_t);
        let next_r = &r - &quotient * &new_r;
        r = std::mem::replace(&mut new_r, next_r);
    }

    if r > BigInt::one() {
        return Err(MathError::InverseNotFound {
            a: a.clone(),
            n: n.clone(),
        });
    }
    // The Bezout coefficient satisfies |t| < n, so one correction suffices.
    if t.is_negative() {
        t += BigInt::from(n.clone());
    }
    Ok(t.to_biguint().expect("coefficient normalized into [0, n)"))
}

pub enum ValueKind {
    RorS,
    Z,
    Key,
}

/// Parses a strict decimal string into a `BigUint`.
///
/// Only ASCII digits are accepted, leading zeros are rejected, and `r`/`s`
/// values must be nonzero. No upper bound is enforced: values at or above the
/// modulus are legal and reduce to their congruence class during arithmetic.
pub fn parse_biguint_decimal(s: &str, kind: ValueKind) -> Result<BigUint> {
    if s.is_empty() {
        bail!("Empty decimal string");
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        bail!("Invalid decimal string: only digits 0-9 allowed");
    }
    if s.len() > 1 && s.starts_with('0') {
        bail!("Invalid decimal string: no leading zeros allowed");
    }

    let value =
        BigUint::from_str_radix(s, 10).map_err(|e| anyhow!("Failed to parse decimal: {}", e))?;

    match kind {
        ValueKind::RorS => {
            if value.is_zero() {
                bail!("r and s values cannot be zero");
            }
        }
        ValueKind::Z | ValueKind::Key => {}
    }

    Ok(value)
}

/// Renders a value as lowercase hex, zero-padded to 32 bytes when it fits.
pub fn biguint_to_hex_string(value: &BigUint) -> String {
    let bytes = value.to_bytes_be();
    if bytes.len() >= 32 {
        return hex::encode(bytes);
    }
    let mut padded = [0u8; 32];
    let offset = 32 - bytes.len();
    padded[offset..].copy_from_slice(&bytes);
    hex::encode(padded)
}
