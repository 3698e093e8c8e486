use {crate::wallet::WalletSnapshot, alloy::primitives::Address};

/// Presentation of the connected account: shortened addresses, avatar
/// initials and the balance with its symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub address: Address,
    /// `0x1234...abcd`
    pub short_address: String,
    /// `0x123456...90abcdef`
    pub long_address: String,
    pub initials: String,
    /// `None` until the balance is known.
    pub balance: Option<String>,
}

impl AccountSummary {
    /// `None` while no wallet is connected.
    pub fn from_snapshot(snapshot: &WalletSnapshot, symbol: &str) -> Option<Self> {
        let address = snapshot.address?;
        let text = address.to_checksum(None);
        Some(Self {
            address,
            short_address: shorten(&text, 6, 4),
            long_address: shorten(&text, 8, 8),
            initials: text[2..4].to_uppercase(),
            balance: snapshot
                .balance
                .as_ref()
                .map(|balance| format!("{balance} {symbol}")),
        })
    }
}

/// Keeps the first `head` and last `tail` characters of an ASCII string.
fn shorten(text: &str, head: usize, tail: usize) -> String {
    if text.len() <= head + tail {
        return text.to_string();
    }
    format!("{}...{}", &text[..head], &text[text.len() - tail..])
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::amount::Amount,
        alloy::primitives::{U256, address},
    };

    #[test]
    fn summarizes_connected_account() {
        let snapshot = WalletSnapshot {
            address: Some(address!("0xabcdef0123456789abcdef0123456789abcdef01")),
            balance: Some(Amount::from_wei(U256::from(1_500_000_000_000_000_000u128))),
        };

        let summary = AccountSummary::from_snapshot(&snapshot, "MON").unwrap();

        assert_eq!(summary.short_address.len(), 13);
        assert!(summary.short_address.starts_with("0x"));
        assert!(summary.short_address.to_lowercase().starts_with("0xabcd"));
        assert!(summary.short_address.to_lowercase().ends_with("...ef01"));
        assert!(summary.long_address.to_lowercase().starts_with("0xabcdef"));
        assert!(summary.long_address.to_lowercase().ends_with("...abcdef01"));
        assert_eq!(summary.initials, "AB");
        assert_eq!(summary.balance.as_deref(), Some("1.5 MON"));
    }

    #[test]
    fn balance_is_optional() {
        let snapshot = WalletSnapshot {
            address: Some(address!("0x1111111111111111111111111111111111111111")),
            balance: None,
        };
        let summary = AccountSummary::from_snapshot(&snapshot, "MON").unwrap();
        assert_eq!(summary.short_address, "0x1111...1111");
        assert_eq!(summary.initials, "11");
        assert_eq!(summary.balance, None);
    }

    #[test]
    fn nothing_to_summarize_when_disconnected() {
        assert_eq!(
            AccountSummary::from_snapshot(&WalletSnapshot::default(), "MON"),
            None
        );
    }
}
