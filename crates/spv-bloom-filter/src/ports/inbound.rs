//! Inbound Ports (Driving Ports)
//!
//! A Merkle block builder only needs a yes/no answer per transaction id,
//! so probabilistic filters and exact id sets share one trait.

use std::collections::{BTreeSet, HashSet};

use shared_types::Hash256;

use crate::domain::BloomFilter;

/// Decides whether a transaction is of interest to the remote peer
pub trait TransactionMatcher {
    /// Test a transaction id (natural byte order)
    fn matches_txid(&self, txid: &Hash256) -> bool;
}

impl TransactionMatcher for BloomFilter {
    fn matches_txid(&self, txid: &Hash256) -> bool {
        self.matches_hash(txid)
    }
}

impl TransactionMatcher for HashSet<Hash256> {
    fn matches_txid(&self, txid: &Hash256) -> bool {
        self.contains(txid)
    }
}

impl TransactionMatcher for BTreeSet<Hash256> {
    fn matches_txid(&self, txid: &Hash256) -> bool {
        self.contains(txid)
    }
}

impl<T: TransactionMatcher + ?Sized> TransactionMatcher for &T {
    fn matches_txid(&self, txid: &Hash256) -> bool {
        (**self).matches_txid(txid)
    }
}
