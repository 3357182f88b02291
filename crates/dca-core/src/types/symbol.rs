//! 거래쌍 심볼.
//!
//! DCA 지시에서 사용하는 심볼은 `BASE-QUOTE` 형식(예: `BTC-USDT`)이 기본이며,
//! 거래소 고유 형식인 구분자 없는 심볼(예: `BTCUSDT`)도 해석할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 구분자 없는 심볼에서 호가 통화를 찾을 때 사용하는 접미사 목록 (순서대로 검사).
pub const KNOWN_QUOTE_CURRENCIES: [&str; 7] = ["USDT", "USDC", "BUSD", "USD", "BTC", "ETH", "FDUSD"];

/// 기준 자산과 호가 통화로 구성된 거래쌍.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    /// 기준 자산 (예: BTC)
    pub base: String,
    /// 호가 통화 (예: USDT)
    pub quote: String,
}

impl TradingPair {
    /// 새 거래쌍을 생성합니다. 두 값 모두 대문자로 정규화됩니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// 심볼 문자열을 해석합니다.
    ///
    /// - `BTC-USDT` 형식은 정확히 두 부분이어야 합니다.
    /// - `BTCUSDT` 형식은 [`KNOWN_QUOTE_CURRENCIES`]의 접미사로 호가 통화를 추정합니다.
    pub fn parse(symbol: &str) -> Option<Self> {
        let symbol = symbol.to_uppercase();

        if symbol.contains('-') {
            let parts: Vec<&str> = symbol.split('-').collect();
            return match parts.as_slice() {
                [base, quote] => Some(Self::new(*base, *quote)),
                _ => None,
            };
        }

        KNOWN_QUOTE_CURRENCIES
            .iter()
            .find(|quote| symbol.ends_with(*quote))
            .map(|quote| Self::new(&symbol[..symbol.len() - quote.len()], *quote))
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

/// 심볼에서 호가 통화를 추출합니다 (예: `BTC-USDT` → `USDT`).
pub fn quote_currency(symbol: &str) -> Option<String> {
    TradingPair::parse(symbol).map(|pair| pair.quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_creation() {
        let pair = TradingPair::new("btc", "usdt");
        assert_eq!(pair.to_string(), "BTC-USDT");
    }

    #[test]
    fn test_parse_dashed() {
        let pair = TradingPair::parse("eth-usdc").unwrap();
        assert_eq!(pair.base, "ETH");
        assert_eq!(pair.quote, "USDC");

        assert!(TradingPair::parse("A-B-C").is_none());
    }

    #[test]
    fn test_quote_currency_from_suffix() {
        assert_eq!(quote_currency("BTCUSDT").as_deref(), Some("USDT"));
        assert_eq!(quote_currency("ETHBTC").as_deref(), Some("BTC"));
        // USDT보다 USD가 뒤에 있으므로 BTCUSD는 USD로 해석
        assert_eq!(quote_currency("BTCUSD").as_deref(), Some("USD"));
        assert_eq!(quote_currency("BTC-USDT").as_deref(), Some("USDT"));
        assert!(quote_currency("DOGEXYZ").is_none());
    }
}
