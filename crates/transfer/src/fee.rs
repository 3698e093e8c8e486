use {
    crate::{amount::Amount, error::TransferError, intent::Transfer, wallet::Wallet},
    alloy::primitives::U256,
    anyhow::{Context, Result},
    std::sync::Arc,
    tracing::instrument,
};

/// Derives the network fee of a transfer from the wallet's gas price and gas
/// estimate. Only read-only queries are made.
#[derive(Clone)]
pub struct FeeEstimator {
    wallet: Arc<dyn Wallet>,
}

impl FeeEstimator {
    pub fn new(wallet: Arc<dyn Wallet>) -> Self {
        Self { wallet }
    }

    #[instrument(skip_all, fields(to = %transfer.to, amount = %transfer.amount))]
    pub async fn estimate(&self, transfer: &Transfer) -> Result<Amount, TransferError> {
        self.fee(transfer).await.map_err(TransferError::estimation)
    }

    async fn fee(&self, transfer: &Transfer) -> Result<Amount> {
        let request = self
            .wallet
            .prepare_transfer(transfer.to, transfer.amount.value)?;
        let (gas_price, gas) = tokio::try_join!(
            self.wallet.gas_price(),
            self.wallet.estimate_gas(&request)
        )?;
        let fee = U256::from(gas)
            .checked_mul(U256::from(gas_price))
            .context("fee overflows 256 bits")?;
        tracing::debug!(gas, gas_price, %fee, "estimated fee");
        Ok(Amount::from_wei(fee))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::wallet::{MockWallet, TransferRequest},
        alloy::primitives::Address,
        number::units::EthUnit,
    };

    fn transfer() -> Transfer {
        Transfer {
            to: Address::repeat_byte(0x42),
            amount: Amount::parse("2.5").unwrap(),
        }
    }

    fn prepared(wallet: &mut MockWallet) {
        wallet.expect_prepare_transfer().returning(|to, value| {
            Ok(TransferRequest {
                to,
                value,
                chain_id: 10143,
            })
        });
    }

    #[tokio::test]
    async fn fee_is_gas_times_price() {
        let mut wallet = MockWallet::new();
        prepared(&mut wallet);
        wallet.expect_gas_price().returning(|| Ok(50_000_000_000));
        wallet
            .expect_estimate_gas()
            .withf(|request| {
                request.to == Address::repeat_byte(0x42)
                    && request.value == U256::from(2_500_000_000_000_000_000u128)
            })
            .times(1)
            .returning(|_| Ok(21_000));
        wallet.expect_send().never();

        let fee = FeeEstimator::new(Arc::new(wallet))
            .estimate(&transfer())
            .await
            .unwrap();

        assert_eq!(fee.value, 21_000u64.wei() * 50u64.gwei());
        assert_eq!(fee.display_value, "0.00105");
    }

    #[tokio::test]
    async fn gas_estimation_failure_keeps_message() {
        let mut wallet = MockWallet::new();
        prepared(&mut wallet);
        wallet.expect_gas_price().returning(|| Ok(1));
        wallet
            .expect_estimate_gas()
            .returning(|_| Err(anyhow::anyhow!("insufficient funds for gas")));

        let err = FeeEstimator::new(Arc::new(wallet))
            .estimate(&transfer())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransferError::EstimationFailed {
                message: "insufficient funds for gas".to_string()
            }
        );
    }

    #[tokio::test]
    async fn preparation_failure_skips_network_queries() {
        let mut wallet = MockWallet::new();
        wallet
            .expect_prepare_transfer()
            .returning(|_, _| Err(anyhow::anyhow!("unsupported chain")));
        wallet.expect_gas_price().never();
        wallet.expect_estimate_gas().never();

        let err = FeeEstimator::new(Arc::new(wallet))
            .estimate(&transfer())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "unsupported chain");
        assert_eq!(err.title(), "Estimation Failed");
    }
}
