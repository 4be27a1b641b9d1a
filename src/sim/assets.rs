//! Brick asset catalog
//!
//! Bricks pick a descriptor by `(row + column + depth) % CATALOG.len()`, so
//! the order of this table is part of the level layout.

use serde::Serialize;

/// Immutable description of a brick's coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Hits needed at depth 1 (1-3)
    pub base_health: u32,
    pub value: u64,
    pub color: &'static str,
    pub glow: &'static str,
    pub text_color: &'static str,
}

const fn entry(
    symbol: &'static str,
    name: &'static str,
    base_health: u32,
    color: &'static str,
    glow: &'static str,
    value: u64,
    text_color: &'static str,
) -> Asset {
    Asset {
        symbol,
        name,
        base_health,
        value,
        color,
        glow,
        text_color,
    }
}

pub const CATALOG: [Asset; 20] = [
    // Majors
    entry("BTC", "Bitcoin", 3, "#F7931A", "#FFD700", 100, "#FFFFFF"),
    entry("ETH", "Ethereum", 2, "#627EEA", "#8C9EFF", 70, "#FFFFFF"),
    entry("SOL", "Solana", 2, "#9945FF", "#C080FF", 60, "#FFFFFF"),
    entry("ADA", "Cardano", 2, "#0033AD", "#0066FF", 50, "#FFFFFF"),
    entry("XRP", "Ripple", 1, "#23292F", "#87CEEB", 40, "#FFFFFF"),
    entry("DOT", "Polkadot", 2, "#E6007A", "#FF3399", 55, "#FFFFFF"),
    entry("BNB", "Binance Coin", 2, "#F3BA2F", "#FFDA66", 65, "#000000"),
    entry("LTC", "Litecoin", 1, "#BEBEBE", "#E0E0E0", 35, "#000000"),
    entry("LINK", "Chainlink", 1, "#2A5ADA", "#6699FF", 45, "#FFFFFF"),
    entry("AVAX", "Avalanche", 2, "#E84142", "#FF6666", 58, "#FFFFFF"),
    // Memecoins
    entry("DOGE", "Dogecoin", 1, "#C2A633", "#FFEB3B", 20, "#000000"),
    entry("SHIB", "Shiba Inu", 1, "#E4572E", "#FF7F50", 15, "#FFFFFF"),
    entry("PEPE", "Pepe Coin", 1, "#88B04B", "#A8D072", 10, "#FFFFFF"),
    entry("FLOKI", "Floki Inu", 1, "#FFD700", "#FFE873", 12, "#000000"),
    // Stablecoins
    entry("USDT", "Tether", 1, "#50AF95", "#70D0B5", 5, "#FFFFFF"),
    entry("USDC", "USD Coin", 1, "#2775CA", "#4795EA", 5, "#FFFFFF"),
    // Others
    entry("XMR", "Monero", 2, "#FF6600", "#FF9933", 48, "#FFFFFF"),
    entry("ZEC", "Zcash", 2, "#F3BA2F", "#FFDA66", 42, "#000000"),
    entry("FIL", "Filecoin", 1, "#0090FF", "#33CCFF", 38, "#FFFFFF"),
    entry("ICP", "Internet Computer", 2, "#3147B5", "#6688FF", 52, "#FFFFFF"),
];

/// Catalog index for a grid cell at a depth
#[inline]
pub fn asset_index(column: usize, row: usize, depth: u32) -> usize {
    (row + column + depth as usize) % CATALOG.len()
}

/// Descriptor by catalog index (wraps out-of-range indices)
#[inline]
pub fn asset(index: usize) -> &'static Asset {
    &CATALOG[index % CATALOG.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_health_range() {
        assert!(CATALOG.iter().all(|a| (1..=3).contains(&a.base_health)));
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(asset_index(0, 0, 1), 1);
        assert_eq!(asset_index(7, 7, 6), 0);
        assert_eq!(asset(19).symbol, "ICP");
        assert_eq!(asset(20).symbol, "BTC");
    }
}
