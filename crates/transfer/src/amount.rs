use {
    alloy::primitives::U256,
    number::units::{NATIVE_DECIMALS, from_wei, to_wei},
    std::fmt::{self, Display},
};

/// A quantity of the native token, kept both as the smallest-unit integer used
/// for comparisons and transaction values and as the decimal text shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    pub value: U256,
    pub display_value: String,
}

impl Amount {
    pub fn from_wei(value: U256) -> Self {
        Self {
            value,
            display_value: from_wei(value, NATIVE_DECIMALS),
        }
    }

    /// Parses user-entered decimal text. The display value is normalized, so
    /// `"2.50"` is shown as `"2.5"`.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        to_wei(text, NATIVE_DECIMALS).map(Self::from_wei)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value)
    }
}
