use {
    crate::{
        amount::Amount,
        wallet::{Wallet, WalletSnapshot},
    },
    alloy::primitives::Address,
    anyhow::Result,
    std::{
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    },
    tokio::{sync::watch, task::JoinHandle},
    tracing::{Instrument, instrument},
};

/// Keeps the [`WalletSnapshot`] of the connected account up to date and
/// publishes every change to subscribers.
#[derive(Clone)]
pub struct BalanceWatcher {
    inner: Arc<Inner>,
}

struct Inner {
    wallet: Arc<dyn Wallet>,
    sender: watch::Sender<WalletSnapshot>,
    /// Sequence number handed to the next balance fetch.
    next_fetch: AtomicU64,
    /// Sequence number of the fetch behind the published balance.
    published_fetch: AtomicU64,
}

impl BalanceWatcher {
    pub fn new(wallet: Arc<dyn Wallet>) -> Self {
        let snapshot = WalletSnapshot {
            address: wallet.account(),
            balance: None,
        };
        Self {
            inner: Arc::new(Inner {
                wallet,
                sender: watch::Sender::new(snapshot),
                next_fetch: AtomicU64::new(0),
                published_fetch: AtomicU64::new(0),
            }),
        }
    }

    pub fn wallet(&self) -> &Arc<dyn Wallet> {
        &self.inner.wallet
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> WalletSnapshot {
        self.inner.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.inner.sender.subscribe()
    }

    /// Connects the wallet and fetches the balance of the new account.
    pub async fn connect(&self) -> Result<Address> {
        let address = self.inner.wallet.connect().await?;
        self.publish_account(Some(address));
        if let Err(err) = self.refresh().await {
            tracing::warn!(?err, "failed to fetch balance after connecting");
        }
        Ok(address)
    }

    pub async fn disconnect(&self) {
        self.inner.wallet.disconnect().await;
        self.publish_account(None);
    }

    /// Fetches the balance of the active account right away. On error the
    /// previous snapshot stays published.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<()> {
        let Some(address) = self.inner.wallet.account() else {
            self.publish_account(None);
            return Ok(());
        };
        self.publish_account(Some(address));

        let fetch = self.inner.next_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        let balance = Amount::from_wei(self.inner.wallet.get_balance(address).await?);
        self.inner.sender.send_if_modified(|snapshot| {
            // the account may have changed while the request was in flight
            if snapshot.address != Some(address) {
                return false;
            }
            // a later fetch already published its result
            if fetch < self.inner.published_fetch.load(Ordering::SeqCst) {
                tracing::debug!(fetch, "dropping outdated balance");
                return false;
            }
            self.inner.published_fetch.store(fetch, Ordering::SeqCst);
            if snapshot.balance.as_ref() == Some(&balance) {
                return false;
            }
            tracing::info!(%address, %balance, "balance updated");
            snapshot.balance = Some(balance);
            true
        });
        Ok(())
    }

    /// Schedules a single refresh once `delay` has passed, giving the chain
    /// time to reflect a new transaction.
    pub fn refresh_after(&self, delay: Duration) -> JoinHandle<()> {
        let watcher = self.clone();
        let task = async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = watcher.refresh().await {
                tracing::warn!(?err, "delayed balance refresh failed");
            }
        };
        tokio::spawn(task.instrument(tracing::info_span!("balance_refresh")))
    }

    /// Spawns a task refreshing the balance every `interval`, starting now.
    /// Runs until the returned handle is aborted.
    pub fn spawn_polling(&self, interval: Duration) -> JoinHandle<()> {
        let watcher = self.clone();
        let task = async move {
            let mut interval = tokio::time::interval(interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if let Err(err) = watcher.refresh().await {
                    tracing::error!(?err, "failed to poll balance");
                }
            }
        };
        tokio::spawn(task.instrument(tracing::info_span!("balance_watcher")))
    }

    fn publish_account(&self, address: Option<Address>) {
        self.inner.sender.send_if_modified(|snapshot| {
            if snapshot.address == address {
                return false;
            }
            *snapshot = WalletSnapshot {
                address,
                balance: None,
            };
            true
        });
    }
}
