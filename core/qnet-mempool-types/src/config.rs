//! Admission limits for mempool

use crate::errors::{MempoolError, MempoolResult};
use serde::{Deserialize, Serialize};

/// Size and capacity limits reported through [`MempoolError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolLimits {
    /// Maximum size of a single transaction in bytes
    pub max_tx_bytes: usize,

    /// Maximum number of admitted transactions
    pub size: usize,

    /// Maximum total bytes of admitted transactions
    pub max_txs_bytes: i64,

    /// Maximum number of pending transactions
    pub pending_size: usize,

    /// Maximum total bytes of pending transactions
    pub max_pending_txs_bytes: i64,
}

impl Default for MempoolLimits {
    fn default() -> Self {
        Self {
            max_tx_bytes: 1024 * 1024, // 1 MB
            size: 5_000,
            max_txs_bytes: 1024 * 1024 * 1024, // 1 GB
            pending_size: 5_000,
            max_pending_txs_bytes: 1024 * 1024 * 1024,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl MempoolLimits {
    /// Defaults overridden by QNET_MEMPOOL_* environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_tx_bytes: env_or("QNET_MEMPOOL_MAX_TX_BYTES", defaults.max_tx_bytes),
            size: env_or("QNET_MEMPOOL_SIZE", defaults.size),
            max_txs_bytes: env_or("QNET_MEMPOOL_MAX_TXS_BYTES", defaults.max_txs_bytes),
            pending_size: env_or("QNET_MEMPOOL_PENDING_SIZE", defaults.pending_size),
            max_pending_txs_bytes: env_or(
                "QNET_MEMPOOL_MAX_PENDING_TXS_BYTES",
                defaults.max_pending_txs_bytes,
            ),
        }
    }

    pub fn check_tx_size(&self, actual: usize) -> MempoolResult<()> {
        if actual > self.max_tx_bytes {
            return Err(MempoolError::tx_too_large(self.max_tx_bytes, actual));
        }
        Ok(())
    }

    /// Check that one more transaction of `tx_size` bytes fits the admitted set
    pub fn check_capacity(&self, num_txs: usize, txs_bytes: i64, tx_size: usize) -> MempoolResult<()> {
        if num_txs >= self.size || txs_bytes.saturating_add(tx_size as i64) > self.max_txs_bytes {
            return Err(MempoolError::mempool_full(
                num_txs,
                self.size,
                txs_bytes,
                self.max_txs_bytes,
            ));
        }
        Ok(())
    }

    /// Same as [`check_capacity`](Self::check_capacity) against the pending limits
    pub fn check_pending_capacity(
        &self,
        num_txs: usize,
        txs_bytes: i64,
        tx_size: usize,
    ) -> MempoolResult<()> {
        if num_txs >= self.pending_size
            || txs_bytes.saturating_add(tx_size as i64) > self.max_pending_txs_bytes
        {
            return Err(MempoolError::pending_full(
                num_txs,
                self.pending_size,
                txs_bytes,
                self.max_pending_txs_bytes,
            ));
        }
        Ok(())
    }
}
