//! Contract with the wallet that owns the connected account.
//!
//! Key management, signing and all node communication happen behind the
//! [`Wallet`] trait. The transfer logic only reads [`WalletSnapshot`]s and asks
//! the wallet to estimate and send prepared transfers.

pub mod node;

use {
    crate::amount::Amount,
    alloy::primitives::{Address, TxHash, U256},
    anyhow::Result,
};

pub use node::NodeWallet;

/// Read-only view of the connected account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    /// `None` while no wallet is connected.
    pub address: Option<Address>,
    /// `None` until the first balance fetch succeeded.
    pub balance: Option<Amount>,
}

impl WalletSnapshot {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Description of a native token transfer that has not been submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: Address,
    pub value: U256,
    pub chain_id: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    /// Currently active account or `None` when disconnected.
    fn account(&self) -> Option<Address>;

    /// Activates the account and returns its address.
    async fn connect(&self) -> Result<Address>;

    async fn disconnect(&self);

    /// Native token balance of `address` in wei.
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Builds the description of a transfer of `value` wei to `to` on the
    /// wallet's chain. Nothing is sent.
    fn prepare_transfer(&self, to: Address, value: U256) -> Result<TransferRequest>;

    /// Units of gas the transfer is expected to consume.
    async fn estimate_gas(&self, transfer: &TransferRequest) -> Result<u64>;

    /// Current price of one unit of gas in wei.
    async fn gas_price(&self) -> Result<u128>;

    /// Signs and broadcasts the transfer.
    async fn send(&self, transfer: &TransferRequest) -> Result<TxHash>;
}
