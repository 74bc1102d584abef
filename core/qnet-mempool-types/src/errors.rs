//! Error types for mempool admission

use std::error::Error as StdError;
use thiserror::Error;

/// Reasons a transaction or bundle slot request is rejected by the mempool
#[derive(Error, Debug)]
pub enum MempoolError {
    /// Transaction was seen earlier
    #[error("tx already exists in cache")]
    TxInCache,

    /// Transaction asks for a height other than the current auction
    #[error("Tx submitted for wrong height, asked for {desired_height}, but current auction height is {current_auction_height}")]
    WrongHeight {
        desired_height: i64,
        current_auction_height: i64,
    },

    /// Target bundle already reached its limit
    #[error("Tx submitted but bundle is full, for bundleId {bundle_id} with bundle size {bundle_height}")]
    BundleFull { bundle_id: i64, bundle_height: i64 },

    /// Bundle metadata of the transaction is inconsistent
    #[error("Tx submitted but malformed with respect to bundling, for bundleId {bundle_id}, at height {bundle_height}, with bundleSize {bundle_size}, and bundleOrder {bundle_order}")]
    TxMalformedForBundle {
        bundle_id: i64,
        bundle_size: i64,
        bundle_height: i64,
        bundle_order: i64,
    },

    /// Transaction is too big to be sent to other peers
    #[error("Tx too large. Max size is {max}, but got {actual}")]
    TxTooLarge { max: usize, actual: usize },

    /// Admitted set is over its count or byte budget
    #[error("mempool is full: number of txs {num_txs} (max: {max_txs}), total txs bytes {txs_bytes} (max: {max_txs_bytes})")]
    MempoolIsFull {
        num_txs: usize,
        max_txs: usize,
        txs_bytes: i64,
        max_txs_bytes: i64,
    },

    /// Too many pending transactions not processed yet
    #[error("mempool pending set is full: number of txs {num_txs} (max: {max_txs}), total txs bytes {txs_bytes} (max: {max_txs_bytes})")]
    MempoolPendingIsFull {
        num_txs: usize,
        max_txs: usize,
        txs_bytes: i64,
        max_txs_bytes: i64,
    },

    /// Transaction failed the pluggable pre-check step
    #[error("{reason}")]
    PreCheck {
        #[source]
        reason: anyhow::Error,
    },
}

/// Result type for mempool admission
pub type MempoolResult<T> = Result<T, MempoolError>;

/// Coarse grouping of rejection reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// Transaction is already known
    Duplicate,
    /// Height or bundle placement does not fit the auction
    SchedulingMismatch,
    /// Size, count or byte budget exceeded
    CapacityExceeded,
    /// External validation failed
    PreCheckFailed,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::Duplicate => "duplicate",
            RejectionKind::SchedulingMismatch => "scheduling_mismatch",
            RejectionKind::CapacityExceeded => "capacity_exceeded",
            RejectionKind::PreCheckFailed => "pre_check_failed",
        }
    }
}

impl MempoolError {
    pub fn wrong_height(desired_height: i64, current_auction_height: i64) -> Self {
        Self::WrongHeight {
            desired_height,
            current_auction_height,
        }
    }

    pub fn bundle_full(bundle_id: i64, bundle_height: i64) -> Self {
        Self::BundleFull {
            bundle_id,
            bundle_height,
        }
    }

    pub fn malformed_for_bundle(
        bundle_id: i64,
        bundle_size: i64,
        bundle_height: i64,
        bundle_order: i64,
    ) -> Self {
        Self::TxMalformedForBundle {
            bundle_id,
            bundle_size,
            bundle_height,
            bundle_order,
        }
    }

    pub fn tx_too_large(max: usize, actual: usize) -> Self {
        Self::TxTooLarge { max, actual }
    }

    pub fn mempool_full(num_txs: usize, max_txs: usize, txs_bytes: i64, max_txs_bytes: i64) -> Self {
        Self::MempoolIsFull {
            num_txs,
            max_txs,
            txs_bytes,
            max_txs_bytes,
        }
    }

    pub fn pending_full(num_txs: usize, max_txs: usize, txs_bytes: i64, max_txs_bytes: i64) -> Self {
        Self::MempoolPendingIsFull {
            num_txs,
            max_txs,
            txs_bytes,
            max_txs_bytes,
        }
    }

    /// Wrap a failure coming from the pre-check step
    pub fn pre_check<E>(reason: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::PreCheck {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> RejectionKind {
        match self {
            MempoolError::TxInCache => RejectionKind::Duplicate,
            MempoolError::WrongHeight { .. }
            | MempoolError::BundleFull { .. }
            | MempoolError::TxMalformedForBundle { .. } => RejectionKind::SchedulingMismatch,
            MempoolError::TxTooLarge { .. }
            | MempoolError::MempoolIsFull { .. }
            | MempoolError::MempoolPendingIsFull { .. } => RejectionKind::CapacityExceeded,
            MempoolError::PreCheck { .. } => RejectionKind::PreCheckFailed,
        }
    }

    /// Stable per-variant label, used for metrics
    pub fn reason_label(&self) -> &'static str {
        match self {
            MempoolError::TxInCache => "tx_in_cache",
            MempoolError::WrongHeight { .. } => "wrong_height",
            MempoolError::BundleFull { .. } => "bundle_full",
            MempoolError::TxMalformedForBundle { .. } => "tx_malformed_for_bundle",
            MempoolError::TxTooLarge { .. } => "tx_too_large",
            MempoolError::MempoolIsFull { .. } => "mempool_is_full",
            MempoolError::MempoolPendingIsFull { .. } => "mempool_pending_is_full",
            MempoolError::PreCheck { .. } => "pre_check",
        }
    }

    pub fn is_tx_in_cache(&self) -> bool {
        matches!(self, MempoolError::TxInCache)
    }

    pub fn is_pre_check(&self) -> bool {
        matches!(self, MempoolError::PreCheck { .. })
    }
}

/// Returns true if `err`, or any error in its source chain, is a pre-check failure.
pub fn is_pre_check_error(err: Option<&(dyn StdError + 'static)>) -> bool {
    let mut current = err;
    while let Some(err) = current {
        if let Some(mempool_err) = err.downcast_ref::<MempoolError>() {
            if mempool_err.is_pre_check() {
                return true;
            }
        }
        current = err.source();
    }
    false
}
