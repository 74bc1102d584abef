//! Mempool admission metrics

use crate::errors::MempoolError;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    /// Rejected transactions by reason
    pub static ref REJECTIONS: CounterVec = register_counter_vec!(
        "qnet_mempool_rejections_total",
        "Total number of rejected transactions",
        &["reason", "kind"]
    ).unwrap();

    /// Wire tx key conversions
    pub static ref TX_KEY_DECODES: CounterVec = register_counter_vec!(
        "qnet_mempool_tx_key_decode_total",
        "Total number of tx key wire conversions",
        &["result"]
    ).unwrap();
}

/// Record a rejection
pub fn record_rejection(err: &MempoolError) {
    REJECTIONS
        .with_label_values(&[err.reason_label(), err.kind().as_str()])
        .inc();
}

/// Record a tx key wire conversion
pub fn record_key_decode(success: bool) {
    let result = if success { "success" } else { "failure" };
    TX_KEY_DECODES.with_label_values(&[result]).inc();
}
