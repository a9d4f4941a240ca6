//! Cryptographic primitives: hashing, keys, addresses, and signatures

pub mod hash;
pub mod keys;
pub mod signature;

pub use hash::{sha256, sha256_hex};
pub use keys::{public_key_from_hex, recover_public_key, Address, KeyError, KeyPair};
pub use signature::{Signature, SIGNATURE_LENGTH};
