//! Untrusted external payment forwarder (boundary collaborator)

pub mod forwarder;

pub use forwarder::Forwarder;
