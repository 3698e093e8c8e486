pub mod account;
pub mod amount;
pub mod arguments;
pub mod balance;
pub mod config;
pub mod error;
pub mod fee;
pub mod flow;
pub mod intent;
pub mod submission;
pub mod validation;
pub mod wallet;

pub use {
    config::Config,
    error::TransferError,
    flow::{Confirmation, TransferFlow},
    intent::{IntentState, TransferIntent},
};
use {
    crate::{
        account::AccountSummary,
        arguments::{Arguments, Command},
        balance::BalanceWatcher,
        wallet::NodeWallet,
    },
    alloy::signers::local::PrivateKeySigner,
    anyhow::{Context, Result, anyhow, bail},
    clap::Parser,
    std::sync::Arc,
};

pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        args.logging.log_filter.as_str(),
        args.logging.log_stderr_threshold.into_level(),
        args.logging.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running transfer with validated arguments:\n{}", args);

    if let Err(err) = run(args).await {
        tracing::error!(?err, "transfer failed");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

pub async fn run(args: Arguments) -> Result<()> {
    let signer: PrivateKeySigner = args
        .private_key
        .trim()
        .parse()
        .context("invalid private key")?;
    let address = signer.address();
    let provider = ethrpc::alloy::provider_with_signer(&args.node_url, "node", signer);
    let wallet = Arc::new(NodeWallet::new(provider, address, args.chain_id));

    let config = args.config();
    let balances = BalanceWatcher::new(wallet);
    balances
        .connect()
        .await
        .context("failed to connect wallet")?;
    let polling = balances.spawn_polling(config.balance_poll_interval);

    let flow = TransferFlow::new(balances, &config);
    let result = match args.command {
        Command::Account => account(&flow, &config),
        Command::Send { to, amount, yes } => send(&flow, &config, &to, &amount, yes).await,
    };

    polling.abort();
    result
}

fn account(flow: &TransferFlow, config: &Config) -> Result<()> {
    let summary = AccountSummary::from_snapshot(&flow.balances().snapshot(), &config.native_symbol)
        .context("wallet is not connected")?;
    println!("[{}] {}", summary.initials, summary.short_address);
    println!("address: {}", summary.address);
    println!(
        "balance: {}",
        summary.balance.as_deref().unwrap_or("unavailable")
    );
    Ok(())
}

async fn send(flow: &TransferFlow, config: &Config, to: &str, amount: &str, yes: bool) -> Result<()> {
    let snapshot = flow.balances().snapshot();
    flow.edit(|intent| {
        intent.set_recipient(to);
        match amount.trim().eq_ignore_ascii_case("max") {
            true => intent.fill_max(&snapshot),
            false => {
                intent.set_amount(amount);
                true
            }
        }
    })
    .then_some(())
    .context("balance is not known yet")?;

    let symbol = &config.native_symbol;
    let Some(confirmation) = flow.request_transfer().await.map_err(presented)? else {
        bail!("the transfer changed while its fee was estimated");
    };
    println!("to:            {}", confirmation.to);
    println!("amount:        {} {symbol}", confirmation.amount);
    println!("estimated fee: {} {symbol}", confirmation.fee);

    if !yes && !ask("send this transfer? [y/N] ").await? {
        flow.cancel().map_err(presented)?;
        println!("cancelled");
        return Ok(());
    }

    let Some(settlement) = flow.confirm().await.map_err(presented)? else {
        bail!("the transfer outcome was superseded");
    };
    println!("transaction:   {}", settlement.transaction_hash);
    println!("explorer:      {}", settlement.explorer_url);

    settlement
        .balance_refresh
        .await
        .context("balance refresh task failed")?;
    if let Some(balance) = flow.balances().snapshot().balance {
        println!("new balance:   {balance} {symbol}");
    }
    Ok(())
}

/// Reads a yes/no answer from stdin.
async fn ask(prompt: &str) -> Result<bool> {
    use std::io::Write as _;

    print!("{prompt}");
    std::io::stdout().flush()?;
    let answer = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await??;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn presented(err: TransferError) -> anyhow::Error {
    anyhow!("{}: {err}", err.title())
}
