use {
    crate::config::Config,
    clap::{Parser, Subcommand},
    std::{
        fmt::{self, Display, Formatter},
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Parser)]
#[clap(version, about = "Transfer the native token of an EVM test network")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "https://testnet-rpc.monad.xyz")]
    pub node_url: Url,

    /// Hex encoded private key of the account that sends transfers.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: String,

    /// Chain the node and the account are expected to be on.
    #[clap(long, env, default_value = "10143")]
    pub chain_id: u64,

    /// Block explorer page of a transaction without the hash.
    #[clap(long, env, default_value = "https://testnet.monvision.io/tx/")]
    pub explorer_tx_url: String,

    /// How often the account balance is fetched in the background.
    #[clap(long, env, default_value = "5s", value_parser = humantime::parse_duration)]
    pub balance_poll_interval: Duration,

    /// How long to wait after a successful transfer before the balance is
    /// fetched again.
    #[clap(long, env, default_value = "2s", value_parser = humantime::parse_duration)]
    pub balance_refresh_delay: Duration,

    /// Symbol of the native token, used when showing amounts.
    #[clap(long, env, default_value = "MON")]
    pub native_symbol: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,transfer=debug")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output logs as JSON.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the address and balance of the account.
    Account,
    /// Transfer tokens to another address.
    Send {
        /// Recipient address.
        #[clap(long)]
        to: String,

        /// Decimal amount of tokens, or `max` for the whole balance.
        #[clap(long)]
        amount: String,

        /// Send without asking for confirmation.
        #[clap(long)]
        yes: bool,
    },
}

impl Arguments {
    pub fn config(&self) -> Config {
        Config {
            explorer_tx_url: self.explorer_tx_url.clone(),
            balance_refresh_delay: self.balance_refresh_delay,
            balance_poll_interval: self.balance_poll_interval,
            native_symbol: self.native_symbol.clone(),
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            private_key: _,
            chain_id,
            explorer_tx_url,
            balance_poll_interval,
            balance_refresh_delay,
            native_symbol,
            command,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "chain_id: {chain_id}")?;
        writeln!(f, "explorer_tx_url: {explorer_tx_url}")?;
        writeln!(f, "balance_poll_interval: {balance_poll_interval:?}")?;
        writeln!(f, "balance_refresh_delay: {balance_refresh_delay:?}")?;
        writeln!(f, "native_symbol: {native_symbol}")?;
        writeln!(f, "command: {command:?}")?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn defaults_target_monad_testnet() {
        let args = Arguments::try_parse_from(["transfer", "--private-key", KEY, "account"]).unwrap();

        assert_eq!(args.node_url.as_str(), "https://testnet-rpc.monad.xyz/");
        assert_eq!(args.chain_id, 10143);
        assert_eq!(args.command, Command::Account);
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn parses_send_with_durations() {
        let args = Arguments::try_parse_from([
            "transfer",
            "--private-key",
            KEY,
            "--balance-poll-interval",
            "1s",
            "--balance-refresh-delay",
            "500ms",
            "send",
            "--to",
            "0xABCDEF0123456789ABCDEF0123456789ABCDEF01",
            "--amount",
            "max",
            "--yes",
        ])
        .unwrap();

        assert_eq!(args.balance_poll_interval, Duration::from_secs(1));
        assert_eq!(args.balance_refresh_delay, Duration::from_millis(500));
        assert_eq!(
            args.command,
            Command::Send {
                to: "0xABCDEF0123456789ABCDEF0123456789ABCDEF01".to_string(),
                amount: "max".to_string(),
                yes: true,
            }
        );
    }

    #[test]
    fn display_hides_private_key() {
        let args = Arguments::try_parse_from(["transfer", "--private-key", KEY, "account"]).unwrap();
        let shown = args.to_string();

        assert!(!shown.contains(&KEY[2..]));
        assert!(shown.contains("private_key: SECRET"));
        assert!(shown.contains("log_filter: warn,transfer=debug"));
    }
}
