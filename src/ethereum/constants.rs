//! Ethereum network constants.

/// Decimals of native ETH (1 ETH = 10^18 wei).
pub const ETH_DECIMALS: u8 = 18;

/// Symbol of the chain's native currency, used in user-facing messages.
pub const NATIVE_SYMBOL: &str = "ETH";
