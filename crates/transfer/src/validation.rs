//! Pure checks over raw user input. None of them need a wallet connection.

use {
    crate::wallet::WalletSnapshot,
    number::units::{NATIVE_DECIMALS, to_wei},
    regex::Regex,
    std::sync::LazyLock,
};

static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap());

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());

/// `0x` followed by exactly 40 hex characters. The EIP-55 checksum is not
/// verified.
pub fn is_valid_address(text: &str) -> bool {
    ADDRESS.is_match(text)
}

/// A plain decimal numeral (no sign, exponent or separators) whose value is
/// strictly positive.
pub fn is_valid_amount(text: &str) -> bool {
    DECIMAL.is_match(text) && text.bytes().any(|byte| matches!(byte, b'1'..=b'9'))
}

/// Whether the connected account can cover `amount_text`. Unknown balances
/// and unparsable amounts count as insufficient.
pub fn has_sufficient_balance(amount_text: &str, snapshot: &WalletSnapshot) -> bool {
    let Some(balance) = &snapshot.balance else {
        return false;
    };
    match to_wei(amount_text, NATIVE_DECIMALS) {
        Ok(value) => value <= balance.value,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::amount::Amount,
        alloy::primitives::{Address, U256},
        number::units::EthUnit,
    };

    fn snapshot(balance: Option<U256>) -> WalletSnapshot {
        WalletSnapshot {
            address: Some(Address::repeat_byte(1)),
            balance: balance.map(Amount::from_wei),
        }
    }

    #[test]
    fn accepts_well_formed_addresses_of_any_case() {
        assert!(is_valid_address(
            "0xABCDEF0123456789ABCDEF0123456789ABCDEF01"
        ));
        assert!(is_valid_address(
            "0xabcdef0123456789abcdef0123456789abcdef01"
        ));
        // wrong checksum casing is still accepted
        assert!(is_valid_address(
            "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01"
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for text in [
            "",
            "0x",
            "abcdef0123456789abcdef0123456789abcdef0123",
            "0xabcdef0123456789abcdef0123456789abcdef0",
            "0xabcdef0123456789abcdef0123456789abcdef012",
            "0Xabcdef0123456789abcdef0123456789abcdef01",
            "0xabcdef0123456789abcdef0123456789abcdeg01",
            " 0xabcdef0123456789abcdef0123456789abcdef01",
            "0xabcdef0123456789abcdef0123456789abcdef01\n",
        ] {
            assert!(!is_valid_address(text), "{text:?}");
        }
    }

    #[test]
    fn amount_must_be_positive_plain_decimal() {
        for text in ["1.5", ".5", "1", "1.", "0.000001", "007"] {
            assert!(is_valid_amount(text), "{text:?}");
        }
        for text in [
            "", ".", "0", "0.0", "00.", "-1", "+1", "1e3", "1,000", "1.2.3", " 1", "abc", "١",
        ] {
            assert!(!is_valid_amount(text), "{text:?}");
        }
    }

    #[test]
    fn balance_check_needs_a_snapshot() {
        assert!(!has_sufficient_balance("0.1", &WalletSnapshot::default()));
        assert!(!has_sufficient_balance("0.1", &snapshot(None)));
    }

    #[test]
    fn balance_check_compares_in_wei() {
        let snapshot = snapshot(Some(1u64.eth()));
        assert!(has_sufficient_balance("1.0", &snapshot));
        assert!(has_sufficient_balance("0.5", &snapshot));
        assert!(!has_sufficient_balance("1.0000001", &snapshot));
        assert!(!has_sufficient_balance("2", &snapshot));
    }

    #[test]
    fn unparsable_amounts_are_insufficient() {
        let snapshot = snapshot(Some(1u64.eth()));
        assert!(!has_sufficient_balance("abc", &snapshot));
        assert!(!has_sufficient_balance("", &snapshot));
        assert!(!has_sufficient_balance(&"9".repeat(90), &snapshot));
    }
}
