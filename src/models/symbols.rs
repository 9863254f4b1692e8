/// A market section of the popular-symbol catalog
#[derive(Debug, Clone, Copy)]
pub struct SymbolGroup {
    pub market: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

/// Commonly requested symbols, grouped by market
pub const POPULAR_SYMBOLS: &[SymbolGroup] = &[
    SymbolGroup {
        market: "US Stocks",
        entries: &[
            ("AAPL", "Apple"),
            ("MSFT", "Microsoft"),
            ("GOOGL", "Alphabet"),
            ("AMZN", "Amazon"),
            ("TSLA", "Tesla"),
            ("NVDA", "NVIDIA"),
            ("META", "Meta"),
            ("NFLX", "Netflix"),
            ("AMD", "AMD"),
            ("INTC", "Intel"),
        ],
    },
    SymbolGroup {
        market: "China A-Shares (Shanghai)",
        entries: &[
            ("600519.SS", "Kweichow Moutai"),
            ("601318.SS", "Ping An Insurance"),
            ("600036.SS", "China Merchants Bank"),
            ("600276.SS", "Hengrui Medicine"),
            ("601166.SS", "Industrial Bank"),
        ],
    },
    SymbolGroup {
        market: "China A-Shares (Shenzhen)",
        entries: &[
            ("000858.SZ", "Wuliangye"),
            ("000333.SZ", "Midea Group"),
            ("002594.SZ", "BYD"),
            ("000001.SZ", "Ping An Bank"),
            ("002415.SZ", "Hikvision"),
        ],
    },
    SymbolGroup {
        market: "Hong Kong",
        entries: &[
            ("0700.HK", "Tencent"),
            ("9988.HK", "Alibaba"),
            ("9999.HK", "NetEase"),
            ("3690.HK", "Meituan"),
            ("1810.HK", "Xiaomi"),
        ],
    },
    SymbolGroup {
        market: "Indices",
        entries: &[
            ("^GSPC", "S&P 500"),
            ("^DJI", "Dow Jones Industrial Average"),
            ("^IXIC", "NASDAQ Composite"),
            ("^HSI", "Hang Seng Index"),
            ("000001.SS", "SSE Composite"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_markets() {
        assert_eq!(POPULAR_SYMBOLS.len(), 5);
        let total: usize = POPULAR_SYMBOLS.iter().map(|g| g.entries.len()).sum();
        assert_eq!(total, 30);
    }
}
