//! Co-signer signature value type
//!
//! A signature is a recovery id plus the two 256-bit scalar components
//! of an ECDSA signature. The wire form is 65 bytes: r || s || v, where
//! v is 0/1 (the legacy 27/28 offsets are accepted on parse).

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use serde::{Deserialize, Serialize};

use super::keys::KeyError;

/// Length of the serialized signature in bytes
pub const SIGNATURE_LENGTH: usize = 65;

/// A recoverable ECDSA signature over an operation hash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Recovery / parity indicator (0 or 1)
    pub recovery_id: u8,
    /// First scalar component, big-endian
    pub r: [u8; 32],
    /// Second scalar component, big-endian
    pub s: [u8; 32],
}

impl Signature {
    /// Parse the 65-byte wire form (r || s || v)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(KeyError::MalformedSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            )));
        }

        let recovery_id = match bytes[64] {
            v @ 0..=1 => v,
            v @ 27..=28 => v - 27,
            v => {
                return Err(KeyError::MalformedSignature(format!(
                    "invalid recovery id {}",
                    v
                )))
            }
        };

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { recovery_id, r, s })
    }

    /// Parse from a hex string
    pub fn from_hex(hex_sig: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_sig)
            .map_err(|e| KeyError::MalformedSignature(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to the 65-byte wire form
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }

    /// Serialize to a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Build from a library recoverable signature
    pub fn from_recoverable(sig: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = sig.serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);
        Self {
            recovery_id: recovery_id.to_i32() as u8,
            r,
            s,
        }
    }

    /// Convert to a library recoverable signature.
    ///
    /// Fails with `MalformedSignature` when the scalar components are
    /// out of range for the curve order.
    pub fn to_recoverable(&self) -> Result<RecoverableSignature, KeyError> {
        let recovery_id = RecoveryId::from_i32(self.recovery_id as i32)
            .map_err(|e| KeyError::MalformedSignature(e.to_string()))?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&self.s);

        RecoverableSignature::from_compact(&compact, recovery_id)
            .map_err(|e| KeyError::MalformedSignature(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;
    use crate::crypto::keys::KeyPair;

    #[test]
    fn test_wire_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.sign_recoverable(&sha256(b"payload")).unwrap();

        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), SIGNATURE_LENGTH);
        let parsed = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn test_hex_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.sign_recoverable(&sha256(b"payload")).unwrap();
        let parsed = Signature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn test_legacy_recovery_id_offset() {
        let kp = KeyPair::generate();
        let sig = kp.sign_recoverable(&sha256(b"payload")).unwrap();

        let mut bytes = sig.to_bytes().to_vec();
        bytes[64] += 27;
        let parsed = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.recovery_id, sig.recovery_id);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Signature::from_bytes(&[0u8; 64]).is_err());
        assert!(Signature::from_bytes(&[0u8; 66]).is_err());
    }

    #[test]
    fn test_rejects_invalid_recovery_id() {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[64] = 5;
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_out_of_range_scalars_rejected() {
        // r and s above the curve order cannot be parsed into a
        // recoverable signature
        let sig = Signature {
            recovery_id: 0,
            r: [0xFF; 32],
            s: [0xFF; 32],
        };
        assert!(sig.to_recoverable().is_err());
    }
}
