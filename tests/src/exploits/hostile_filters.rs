//! # Hostile Filter Messages
//!
//! A peer controls the size of the filter the node must hold and the number
//! of hash rounds run per transaction. Both are capped; anything above the
//! caps is refused rather than clamped.

#[cfg(test)]
mod tests {
    use shared_types::{deserialize, serialize, DecodeError, Hash256, VarInt};
    use spv_bloom_filter::{
        BloomFilter, BloomUpdateFlag, FilterAdd, FilterConfig, FilterError, FilterLoad,
        PeerFilter, MAX_FILTER_ADD_DATA, MAX_FILTER_BYTES, MAX_HASH_FUNCS,
    };

    fn honest_load() -> FilterLoad {
        let mut filter = BloomFilter::new(5, 0.001, 9, BloomUpdateFlag::All).unwrap();
        filter.insert_hash(&Hash256::from_bytes([0x11; 32]));
        filter.to_filter_load()
    }

    #[test]
    fn test_oversized_bit_array_is_refused() {
        let mut peer = PeerFilter::new(FilterConfig::default()).unwrap();
        peer.load(honest_load()).unwrap();

        let err = peer
            .load(FilterLoad {
                data: vec![0xFF; MAX_FILTER_BYTES + 1],
                hash_funcs: 1,
                tweak: 0,
                flags: BloomUpdateFlag::None,
            })
            .unwrap_err();
        assert!(err.is_size_limit());

        // The honest filter survives the rejected replacement.
        let kept = peer.filter().unwrap();
        assert!(kept.matches_hash(&Hash256::from_bytes([0x11; 32])));
        assert_eq!(kept.tweak(), 9);
    }

    #[test]
    fn test_excess_hash_rounds_are_refused() {
        let mut peer = PeerFilter::new(FilterConfig::default()).unwrap();
        let err = peer
            .load(FilterLoad {
                data: vec![0; 64],
                hash_funcs: MAX_HASH_FUNCS + 1,
                tweak: 0,
                flags: BloomUpdateFlag::All,
            })
            .unwrap_err();
        assert!(matches!(err, FilterError::TooManyHashFuncs { count: 51, max: 50 }));
        assert!(!peer.is_loaded());
    }

    #[test]
    fn test_oversized_length_prefix_fails_before_allocation() {
        // Claims a 2^32 byte bit array, then ends.
        let mut bytes = serialize(&VarInt(1 << 32));
        bytes.extend_from_slice(&[0; 9]);
        assert!(matches!(
            deserialize::<FilterLoad>(&bytes),
            Err(DecodeError::OversizedLength { .. })
        ));
    }

    #[test]
    fn test_unknown_update_flag_on_wire() {
        let mut bytes = serialize(&honest_load());
        let last = bytes.len() - 1;
        bytes[last] = 3;
        assert!(deserialize::<FilterLoad>(&bytes).is_err());
    }

    #[test]
    fn test_oversized_filteradd() {
        let mut peer = PeerFilter::new(FilterConfig::default()).unwrap();
        peer.load(honest_load()).unwrap();

        let err = peer
            .add(&FilterAdd {
                data: vec![0xAB; MAX_FILTER_ADD_DATA + 1],
            })
            .unwrap_err();
        assert!(matches!(err, FilterError::ElementTooLarge { size: 521, max: 520 }));

        let mut bytes = serialize(&VarInt(MAX_FILTER_ADD_DATA as u64 + 1));
        bytes.extend_from_slice(&[0xAB; MAX_FILTER_ADD_DATA + 1]);
        assert!(deserialize::<FilterAdd>(&bytes).is_err());
    }

    #[test]
    fn test_filteradd_without_filter() {
        let mut peer = PeerFilter::new(FilterConfig::default()).unwrap();
        let err = peer.add(&FilterAdd { data: vec![1, 2, 3] }).unwrap_err();
        assert!(matches!(err, FilterError::NoFilterLoaded));
        assert!(!peer.is_loaded());
    }

    #[test]
    fn test_saturated_filter_matches_everything() {
        // Legal, but reveals nothing: every transaction is relayed.
        let mut peer = PeerFilter::new(FilterConfig::default()).unwrap();
        peer.load(FilterLoad {
            data: vec![0xFF; 16],
            hash_funcs: 3,
            tweak: 0,
            flags: BloomUpdateFlag::None,
        })
        .unwrap();
        for n in 0..=255u8 {
            assert!(peer.matches_txid(&Hash256::from_bytes([n; 32])));
        }
    }
}
