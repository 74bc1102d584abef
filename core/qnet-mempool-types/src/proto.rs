//! Wire representation of transaction keys

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire conversion errors
#[derive(Error, Debug)]
pub enum ProtoError {
    /// The message itself was absent
    #[error("nil data")]
    NilData,

    /// Encoded bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[source] bincode::Error),

    /// Message could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[source] bincode::Error),
}

/// Result type for wire conversions
pub type ProtoResult<T> = Result<T, ProtoError>;

/// Transaction key as carried inside gossip and consensus messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxKeyProto {
    pub tx_key: Vec<u8>,
}

impl TxKeyProto {
    pub fn encode(&self) -> ProtoResult<Vec<u8>> {
        bincode::serialize(self).map_err(ProtoError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> ProtoResult<Self> {
        bincode::deserialize(bytes).map_err(ProtoError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx_key::TxKey;

    #[test]
    fn test_encode_decode() {
        let proto = TxKey::from_tx(b"foo").to_proto();
        let bytes = proto.encode().unwrap();

        assert_eq!(TxKeyProto::decode(&bytes).unwrap(), proto);
    }

    #[test]
    fn test_decode_truncated_bytes() {
        let bytes = TxKey::from_tx(b"foo").to_proto().encode().unwrap();
        let err = TxKeyProto::decode(&bytes[..10]).unwrap_err();

        assert!(matches!(err, ProtoError::Decode(_)));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(TxKeyProto::decode(&[]).is_err());
    }
}
