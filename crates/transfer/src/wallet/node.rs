//! [`Wallet`] backed by an Ethereum node and a local signer.

use {
    super::{TransferRequest, Wallet},
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, TxHash, U256},
        providers::Provider,
        rpc::types::TransactionRequest,
    },
    anyhow::{Result, ensure},
    ethrpc::AlloyProvider,
    std::sync::atomic::{AtomicBool, Ordering},
    tracing::instrument,
};

pub struct NodeWallet {
    provider: AlloyProvider,
    signer: Address,
    chain_id: u64,
    connected: AtomicBool,
}

impl NodeWallet {
    /// `provider` must be able to sign for `signer`.
    pub fn new(provider: AlloyProvider, signer: Address, chain_id: u64) -> Self {
        Self {
            provider,
            signer,
            chain_id,
            connected: AtomicBool::new(false),
        }
    }

    fn transaction(&self, transfer: &TransferRequest) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.signer)
            .with_to(transfer.to)
            .with_value(transfer.value)
            .with_chain_id(transfer.chain_id)
    }
}

#[async_trait::async_trait]
impl Wallet for NodeWallet {
    fn account(&self) -> Option<Address> {
        self.connected
            .load(Ordering::Acquire)
            .then_some(self.signer)
    }

    #[instrument(skip_all)]
    async fn connect(&self) -> Result<Address> {
        let chain_id = self.provider.get_chain_id().await?;
        ensure!(
            chain_id == self.chain_id,
            "node is on chain {chain_id} but the wallet is configured for chain {}",
            self.chain_id
        );
        self.connected.store(true, Ordering::Release);
        tracing::info!(address = %self.signer, chain_id, "wallet connected");
        Ok(self.signer)
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
        tracing::info!(address = %self.signer, "wallet disconnected");
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    fn prepare_transfer(&self, to: Address, value: U256) -> Result<TransferRequest> {
        Ok(TransferRequest {
            to,
            value,
            chain_id: self.chain_id,
        })
    }

    async fn estimate_gas(&self, transfer: &TransferRequest) -> Result<u64> {
        Ok(self.provider.estimate_gas(self.transaction(transfer)).await?)
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    #[instrument(skip_all, fields(to = %transfer.to, value = %transfer.value))]
    async fn send(&self, transfer: &TransferRequest) -> Result<TxHash> {
        ensure!(self.account().is_some(), "wallet is not connected");
        let pending = self
            .provider
            .send_transaction(self.transaction(transfer))
            .await?;
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{U64, U128, address},
            providers::{ProviderBuilder, mock::Asserter},
        },
    };

    const SIGNER: Address = address!("0x1111111111111111111111111111111111111111");

    fn wallet(asserter: &Asserter, chain_id: u64) -> NodeWallet {
        let provider = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();
        NodeWallet::new(provider, SIGNER, chain_id)
    }

    #[tokio::test]
    async fn connects_only_to_the_configured_chain() {
        let asserter = Asserter::new();
        let wallet = wallet(&asserter, 10143);
        assert_eq!(wallet.account(), None);

        asserter.push_success(&U64::from(1));
        assert!(wallet.connect().await.is_err());
        assert_eq!(wallet.account(), None);

        asserter.push_success(&U64::from(10143));
        assert_eq!(wallet.connect().await.unwrap(), SIGNER);
        assert_eq!(wallet.account(), Some(SIGNER));

        wallet.disconnect().await;
        assert_eq!(wallet.account(), None);
    }

    #[tokio::test]
    async fn reads_balance_and_gas_price_from_node() {
        let asserter = Asserter::new();
        let wallet = wallet(&asserter, 10143);

        asserter.push_success(&U256::from(42));
        assert_eq!(wallet.get_balance(SIGNER).await.unwrap(), U256::from(42));

        asserter.push_success(&U128::from(50_000_000_000u64));
        assert_eq!(wallet.gas_price().await.unwrap(), 50_000_000_000);
    }

    #[tokio::test]
    async fn refuses_to_send_while_disconnected() {
        let asserter = Asserter::new();
        let wallet = wallet(&asserter, 10143);
        let transfer = wallet
            .prepare_transfer(SIGNER, U256::from(1))
            .unwrap();

        assert_eq!(transfer.chain_id, 10143);
        assert!(wallet.send(&transfer).await.is_err());
    }
}
