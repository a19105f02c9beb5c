//! Ports Layer
//!
//! Defines the interface callers use to test a block's transactions
//! against whatever they are watching.

pub mod inbound;

pub use inbound::TransactionMatcher;
