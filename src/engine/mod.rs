//! Authorization engine: sequence tracking, signature verification,
//! the authorize pipeline, and transfer execution

pub mod authorize;
pub mod executor;
pub mod sequence;
pub mod verifier;

pub use authorize::{AuthorizationEngine, AuthorizationResult};
pub use executor::{execute_batch, execute_transfer};
pub use sequence::SequenceTracker;
pub use verifier::{recover_signer, verify};
