//! # Exploit Simulations
//!
//! Messages a malicious peer can send. Every one must be rejected with the
//! right error class and without unbounded work.

pub mod hostile_filters;
pub mod malformed_proofs;
