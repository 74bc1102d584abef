//! Content-addressed transaction identity

use crate::metrics;
use crate::proto::{ProtoError, ProtoResult, TxKeyProto};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

/// Size of a transaction key in bytes (SHA-256 output)
pub const TX_KEY_SIZE: usize = 32;

/// Fixed length key used to index and deduplicate transactions.
///
/// Two keys are equal iff the transactions they were derived from are
/// byte-identical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TxKey([u8; TX_KEY_SIZE]);

impl TxKey {
    /// Derive the key of a raw transaction
    pub fn from_tx(tx: &[u8]) -> Self {
        Self(Sha256::digest(tx).into())
    }

    /// Derive keys for a batch of transactions, preserving order
    pub fn from_tx_batch<T: AsRef<[u8]>>(txs: &[T]) -> Vec<Self> {
        txs.iter().map(|tx| Self::from_tx(tx.as_ref())).collect()
    }

    /// All-zero key
    pub const fn zero() -> Self {
        Self([0u8; TX_KEY_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; TX_KEY_SIZE] {
        &self.0
    }

    /// First 8 hex chars, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Convert to the wire message
    pub fn to_proto(&self) -> TxKeyProto {
        TxKeyProto {
            tx_key: self.0.to_vec(),
        }
    }

    /// Convert from the wire message.
    ///
    /// Bytes are copied positionally: a short field leaves trailing zeros and
    /// anything past 32 bytes is dropped.
    pub fn from_proto(proto: Option<&TxKeyProto>) -> ProtoResult<Self> {
        let proto = match proto {
            Some(proto) => proto,
            None => {
                metrics::record_key_decode(false);
                return Err(ProtoError::NilData);
            }
        };

        if proto.tx_key.len() != TX_KEY_SIZE {
            debug!(
                "tx key field has {} bytes, expected {}",
                proto.tx_key.len(),
                TX_KEY_SIZE
            );
        }

        let mut bytes = [0u8; TX_KEY_SIZE];
        let len = proto.tx_key.len().min(TX_KEY_SIZE);
        bytes[..len].copy_from_slice(&proto.tx_key[..len]);

        metrics::record_key_decode(true);
        Ok(Self(bytes))
    }
}

/// Convert a list of wire messages, stopping at the first failure.
///
/// No partial result is returned on error.
pub fn tx_keys_from_proto(protos: &[Option<TxKeyProto>]) -> ProtoResult<Vec<TxKey>> {
    protos
        .iter()
        .map(|proto| TxKey::from_proto(proto.as_ref()))
        .collect()
}

impl From<[u8; TX_KEY_SIZE]> for TxKey {
    fn from(bytes: [u8; TX_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for TxKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxKey({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_transactions_distinct_keys() {
        let a = TxKey::from_tx(b"foo");
        let b = TxKey::from_tx(b"foobar");

        assert_ne!(a, b);
        assert_eq!(a, TxKey::from_tx(b"foo"));
        assert_eq!(a.as_bytes().len(), TX_KEY_SIZE);
    }

    #[test]
    fn test_empty_transaction_has_key() {
        // sha256 of the empty string
        assert_eq!(
            TxKey::from_tx(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_proto_round_trip() {
        for tx in [&b""[..], &b"foo"[..], &b"foobar"[..], &[0xffu8; 1024][..]] {
            let key = TxKey::from_tx(tx);
            let proto = key.to_proto();
            assert_eq!(proto.tx_key.len(), TX_KEY_SIZE);
            assert_eq!(TxKey::from_proto(Some(&proto)).unwrap(), key);
        }
    }

    #[test]
    fn test_from_proto_nil() {
        let err = TxKey::from_proto(None).unwrap_err();
        assert!(matches!(err, ProtoError::NilData));
        assert!(err.to_string().contains("nil data"));
    }

    #[test]
    fn test_from_proto_short_field_zero_pads() {
        let proto = TxKeyProto {
            tx_key: vec![1, 2, 3],
        };
        let key = TxKey::from_proto(Some(&proto)).unwrap();

        assert_eq!(&key.as_bytes()[..3], &[1, 2, 3]);
        assert!(key.as_bytes()[3..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_from_proto_empty_field_is_zero_key() {
        let proto = TxKeyProto { tx_key: vec![] };
        assert_eq!(TxKey::from_proto(Some(&proto)).unwrap(), TxKey::zero());
    }

    #[test]
    fn test_from_proto_long_field_truncates() {
        let mut raw = vec![7u8; TX_KEY_SIZE];
        raw.extend_from_slice(&[9u8; 8]);
        let key = TxKey::from_proto(Some(&TxKeyProto { tx_key: raw })).unwrap();

        assert_eq!(key.as_bytes(), &[7u8; TX_KEY_SIZE]);
    }

    #[test]
    fn test_list_preserves_order() {
        let keys = TxKey::from_tx_batch(&["a", "b", "c", "d"]);
        let protos: Vec<_> = keys.iter().map(|k| Some(k.to_proto())).collect();

        assert_eq!(tx_keys_from_proto(&protos).unwrap(), keys);
        assert!(tx_keys_from_proto(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_list_fails_fast() {
        let keys = TxKey::from_tx_batch(&["a", "b", "c"]);
        let protos = vec![
            Some(keys[0].to_proto()),
            Some(keys[1].to_proto()),
            None,
            Some(keys[2].to_proto()),
        ];

        let result = tx_keys_from_proto(&protos);
        assert!(matches!(result, Err(ProtoError::NilData)));
    }

    #[test]
    fn test_short_and_display() {
        let key = TxKey::from_tx(b"foo");
        let rendered = key.to_string();

        assert_eq!(rendered.len(), TX_KEY_SIZE * 2);
        assert_eq!(key.short(), rendered[..8]);
        assert_eq!(format!("{:?}", key), format!("TxKey({})", rendered));
    }
}
