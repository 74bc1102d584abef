//! Transaction identity and admission errors for the QNet mempool

pub mod config;
pub mod errors;
pub mod metrics;
pub mod proto;
pub mod tx_key;

pub use config::MempoolLimits;
pub use errors::{is_pre_check_error, MempoolError, MempoolResult, RejectionKind};
pub use proto::{ProtoError, ProtoResult, TxKeyProto};
pub use tx_key::{tx_keys_from_proto, TxKey, TX_KEY_SIZE};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        config::*,
        errors::*,
        proto::*,
        tx_key::*,
    };
}
