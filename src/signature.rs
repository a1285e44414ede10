//! Signature data types

use crate::math::{parse_biguint_decimal, ValueKind};
use anyhow::Result;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Raw signature tuple as it appears in input files: decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInput {
    pub r: String,
    pub s: String,
    pub z: String,
}

/// Parsed signature tuple over arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
    pub z: BigUint,
}

impl TryFrom<SignatureInput> for Signature {
    type Error = anyhow::Error;

    fn try_from(input: SignatureInput) -> Result<Self> {
        let r = parse_biguint_decimal(&input.r, ValueKind::RorS)?;
        let s = parse_biguint_decimal(&input.s, ValueKind::RorS)?;
        let z = parse_biguint_decimal(&input.z, ValueKind::Z)?;
        Ok(Signature { r, s, z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_signature_input_parse_decimal() {
        let input = SignatureInput {
            r: "46159134511846639653039227807867168677952429760806101162575716914492122120852"
                .to_string(),
            s: "7519772703183545940918986660617875086369147038649256132503899290067419860069"
                .to_string(),
            z: "96305888925087028226280700902788330707257073607110099029890896029884121755055"
                .to_string(),
        };
        let sig = Signature::try_from(input).unwrap();
        assert!(!sig.r.is_zero());
        assert!(!sig.s.is_zero());
    }

    #[test]
    fn test_signature_rejects_zero_s() {
        let input = SignatureInput {
            r: "123".to_string(),
            s: "0".to_string(),
            z: "789".to_string(),
        };
        assert!(Signature::try_from(input).is_err());
    }

    #[test]
    fn test_signature_allows_zero_hash() {
        let input = SignatureInput {
            r: "123".to_string(),
            s: "456".to_string(),
            z: "0".to_string(),
        };
        let sig = Signature::try_from(input).unwrap();
        assert!(sig.z.is_zero());
    }
}
