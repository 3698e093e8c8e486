use {
    alloy::primitives::{
        U256,
        utils::{Unit, parse_units},
    },
    anyhow::{Context, Result, ensure},
};

/// Number of decimals of the native token, i.e. 1 token = 10^18 wei.
pub const NATIVE_DECIMALS: u8 = 18;

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Gwei amount as wei (i.e. 1e9 wei).
    fn gwei(self) -> U256 {
        self.wei() * Unit::GWEI.wei()
    }

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

/// Converts a plain decimal numeral (`"1"`, `"2.5"`, `".5"`, `"1."`) into its
/// smallest-unit integer representation with the given number of decimals.
///
/// Whitespace, signs, exponents and thousands separators are rejected.
/// Fractional digits beyond `decimals` are rounded half-up.
pub fn to_wei(amount: &str, decimals: u8) -> Result<U256> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    ensure!(
        !whole.is_empty() || !fraction.is_empty(),
        "amount {amount:?} has no digits"
    );
    ensure!(
        whole
            .bytes()
            .chain(fraction.bytes())
            .all(|byte| byte.is_ascii_digit()),
        "amount {amount:?} is not a plain decimal number"
    );

    // `parse_units` truncates excess fractional digits
    let wei = parse_units(amount, decimals)
        .with_context(|| format!("amount {amount:?} does not fit into 256 bits"))?
        .get_absolute();
    let rounds_up = fraction
        .as_bytes()
        .get(usize::from(decimals))
        .is_some_and(|digit| *digit >= b'5');
    match rounds_up {
        true => wei
            .checked_add(U256::ONE)
            .with_context(|| format!("amount {amount:?} does not fit into 256 bits")),
        false => Ok(wei),
    }
}

/// Renders a smallest-unit integer as a decimal string with the given number
/// of decimals. Trailing fractional zeros are dropped, so whole amounts are
/// rendered without a decimal point.
pub fn from_wei(value: U256, decimals: u8) -> String {
    let unit = U256::from(10).pow(U256::from(decimals));
    let whole = value / unit;
    let fraction = value % unit;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = fraction.to_string();
    let fraction = format!("{fraction:0>width$}", width = usize::from(decimals));
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
