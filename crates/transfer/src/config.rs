use std::time::Duration;

/// Settings of the transfer flow that do not concern the connection to the
/// node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix of explorer links; the transaction hash is appended.
    pub explorer_tx_url: String,
    /// Wait between a successful send and the balance refresh, so the node
    /// has seen the new block.
    pub balance_refresh_delay: Duration,
    pub balance_poll_interval: Duration,
    /// Ticker of the native token.
    pub native_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            explorer_tx_url: "https://testnet.monvision.io/tx/".to_string(),
            balance_refresh_delay: Duration::from_secs(2),
            balance_poll_interval: Duration::from_secs(5),
            native_symbol: "MON".to_string(),
        }
    }
}
