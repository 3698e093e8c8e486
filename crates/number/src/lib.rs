//! Conversions between user-facing decimal amounts and on-chain integer
//! amounts of the native token.
pub mod units;
