//! Signature-equation checks for a candidate private key

use num_bigint::BigUint;

use crate::error::MathError;
use crate::math::mod_inverse;
use crate::signature::Signature;

/// Outcome of checking one signature against the candidate key.
#[derive(Debug, Clone)]
pub struct SignatureCheck {
    pub consistent: bool,
    pub ephemeral: BigUint,
}

/// Reconstructs the ephemeral nonce `k = (z + d*r) * s^{-1} mod n`.
///
/// This is the nonce the signer would have used if `d` is the private key
/// behind `(r, s)` over hash `z`. Fails when `s` is not invertible mod `n`.
pub fn compute_ephemeral(
    sig: &Signature,
    d: &BigUint,
    n: &BigUint,
) -> Result<BigUint, MathError> {
    let s_inv = mod_inverse(&sig.s, n)?;
    Ok((&sig.z + d * &sig.r) * s_inv % n)
}

/// Checks the ECDSA signing identity `s*k ≡ z + d*r (mod n)` with `k`
/// reconstructed from the candidate key.
pub fn verify_equation(sig: &Signature, d: &BigUint, n: &BigUint) -> Result<bool, MathError> {
    let k = compute_ephemeral(sig, d, n)?;
    let lhs = &sig.s * &k % n;
    let rhs = (&sig.z + d * &sig.r) % n;
    Ok(lhs == rhs)
}

/// Checks one signature and reports the verdict together with the
/// reconstructed ephemeral.
pub fn check_signature(
    sig: &Signature,
    d: &BigUint,
    n: &BigUint,
) -> Result<SignatureCheck, MathError> {
    let ephemeral = compute_ephemeral(sig, d, n)?;
    let lhs = &sig.s * &ephemeral % n;
    let rhs = (&sig.z + d * &sig.r) % n;
    Ok(SignatureCheck {
        consistent: lhs == rhs,
        ephemeral,
    })
}

/// Strict AND over a set of signatures. The first inverse failure propagates.
pub fn check_signatures(
    sigs: &[Signature],
    d: &BigUint,
    n: &BigUint,
) -> Result<bool, MathError> {
    let mut all = true;
    for sig in sigs {
        all &= verify_equation(sig, d, n)?;
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::secp256k1_order;
    use crate::signature::SignatureInput;
    use num_traits::Num;

    fn fixture_signatures() -> Vec<Signature> {
        vec![
            Signature::try_from(SignatureInput {
                r: "46159134511846639653039227807867168677952429760806101162575716914492122120852"
                    .into(),
                s: "7519772703183545940918986660617875086369147038649256132503899290067419860069"
                    .into(),
                z: "96305888925087028226280700902788330707257073607110099029890896029884121755055"
                    .into(),
            })
            .unwrap(),
            Signature::try_from(SignatureInput {
                r: "111616838599096250300489315075857406212435899769031134709979742002100806022869"
                    .into(),
                s: "16473844652988003574805773187527026768208893032028674194682143648834372476120"
                    .into(),
                z: "82526933124808898216141238576469063794369340677613970807733221005881288311205"
                    .into(),
            })
            .unwrap(),
        ]
    }

    fn fixture_key() -> BigUint {
        BigUint::from_str_radix(
            "51762293150226378344177631012693936892603461211481966174304368340569388768931",
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_verify_equation_known_vectors() {
        let n = secp256k1_order();
        let d = fixture_key();
        for sig in fixture_signatures() {
            assert!(verify_equation(&sig, &d, &n).unwrap());
        }
    }

    #[test]
    fn test_check_signatures_strict_and() {
        let n = secp256k1_order();
        let d = fixture_key();
        let sigs = fixture_signatures();
        assert!(check_signatures(&sigs, &d, &n).unwrap());
    }

    #[test]
    fn test_compute_ephemeral_reference_values() {
        let n = secp256k1_order();
        let d = fixture_key();
        let sigs = fixture_signatures();

        let k1 = compute_ephemeral(&sigs[0], &d, &n).unwrap();
        let k2 = compute_ephemeral(&sigs[1], &d, &n).unwrap();

        assert_eq!(
            k1.to_string(),
            "78631208634310757137311886722977273195573298863325785951620448051587551696696"
        );
        assert_eq!(
            k2.to_string(),
            "56280934004974103709308237804792071906682860146036388638230996376774385930314"
        );
    }

    #[test]
    fn test_congruence_class_invariance() {
        let n = secp256k1_order();
        let d = fixture_key();
        let base = &fixture_signatures()[0];

        let shifted = Signature {
            r: &base.r + &n * BigUint::from(3u32),
            s: &base.s + &n,
            z: &base.z + &n * BigUint::from(2u32),
        };
        assert!(verify_equation(&shifted, &d, &n).unwrap());

        let d_shifted = &d + &n;
        assert!(verify_equation(base, &d_shifted, &n).unwrap());
        assert_eq!(
            compute_ephemeral(base, &d, &n).unwrap(),
            compute_ephemeral(base, &d_shifted, &n).unwrap()
        );
    }

    #[test]
    fn test_tampered_key_changes_ephemeral() {
        let n = secp256k1_order();
        let d = fixture_key();
        let base = &fixture_signatures()[0];

        let k = compute_ephemeral(base, &d, &n).unwrap();
        let tampered = &d + BigUint::from(1u32);
        let k_tampered = compute_ephemeral(base, &tampered, &n).unwrap();
        assert_ne!(k, k_tampered);
    }

    #[test]
    fn test_noninvertible_s_propagates() {
        // s = 5 shares a factor with n = 15.
        let n = BigUint::from(15u32);
        let d = BigUint::from(2u32);
        let sig = Signature {
            r: BigUint::from(3u32),
            s: BigUint::from(5u32),
            z: BigUint::from(7u32),
        };
        let err = verify_equation(&sig, &d, &n).unwrap_err();
        assert!(matches!(err, MathError::InverseNotFound { .. }));
    }
}
