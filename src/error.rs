use num_bigint::BigUint;

/// Arithmetic errors surfaced by the modular routines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// No multiplicative inverse exists: gcd(a, n) > 1.
    #[error("modular inverse does not exist for {a} mod {n}")]
    InverseNotFound { a: BigUint, n: BigUint },
}
