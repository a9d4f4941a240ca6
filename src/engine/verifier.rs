//! Co-signer signature verification
//!
//! Recovers the signer identity from (operation hash, signature) and
//! accepts it only when it belongs to the candidate signer set. The
//! canonical encoding is fixed-width, so there is no hash-length or
//! padding ambiguity to exploit.

use crate::crypto::{recover_public_key, Address, KeyError, Signature};

/// Recover the address that produced `signature` over `hash`
///
/// # Errors
/// `MalformedSignature` for out-of-range scalar components or an invalid
/// recovery id; `RecoveryFailed` when no public key can be recovered.
pub fn recover_signer(hash: &[u8; 32], signature: &Signature) -> Result<Address, KeyError> {
    let recoverable = signature.to_recoverable()?;
    let public_key = recover_public_key(hash, &recoverable)?;
    Ok(Address::from_public_key(&public_key))
}

/// Recover the signer and check membership in the candidate set
///
/// Returns `Ok(Some(address))` when the recovered identity is a candidate,
/// `Ok(None)` when it is not, and an error for malformed signatures.
pub fn verify(
    hash: &[u8; 32],
    signature: &Signature,
    candidates: &[Address],
) -> Result<Option<Address>, KeyError> {
    let signer = recover_signer(hash, signature)?;
    Ok(candidates.contains(&signer).then_some(signer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256, KeyPair};

    #[test]
    fn test_recover_matches_signer() {
        let kp = KeyPair::generate();
        let hash = sha256(b"operation");
        let sig = kp.sign_recoverable(&hash).unwrap();

        assert_eq!(recover_signer(&hash, &sig).unwrap(), kp.address());
    }

    #[test]
    fn test_verify_accepts_candidate() {
        let kp = KeyPair::generate();
        let other = KeyPair::generate();
        let hash = sha256(b"operation");
        let sig = kp.sign_recoverable(&hash).unwrap();

        let candidates = vec![other.address(), kp.address()];
        assert_eq!(verify(&hash, &sig, &candidates).unwrap(), Some(kp.address()));
    }

    #[test]
    fn test_verify_rejects_non_candidate() {
        let kp = KeyPair::generate();
        let hash = sha256(b"operation");
        let sig = kp.sign_recoverable(&hash).unwrap();

        let candidates = vec![KeyPair::generate().address()];
        assert_eq!(verify(&hash, &sig, &candidates).unwrap(), None);
    }

    #[test]
    fn test_signature_does_not_transfer_to_other_hash() {
        let kp = KeyPair::generate();
        let sig = kp.sign_recoverable(&sha256(b"operation A")).unwrap();

        // Recovery against a different hash yields a different identity,
        // so candidate membership fails
        let other_hash = sha256(b"operation B");
        let result = verify(&other_hash, &sig, &[kp.address()]).unwrap_or(None);
        assert_eq!(result, None);
    }

    #[test]
    fn test_malformed_signature_is_error_not_panic() {
        let sig = Signature {
            recovery_id: 1,
            r: [0xFF; 32],
            s: [0xFF; 32],
        };
        let hash = sha256(b"operation");
        assert!(recover_signer(&hash, &sig).is_err());
    }
}
