//! Binance 커넥터.

use async_trait::async_trait;
use dca_core::BinanceSsmCredentials;
use rust_decimal::Decimal;
use tracing::debug;

use super::require;
use crate::traits::{Exchange, ExchangeResult, Order};
use crate::ExchangeError;

/// Binance 현물 거래소.
#[derive(Debug, Clone)]
pub struct BinanceExchange {
    credentials: BinanceSsmCredentials,
}

impl BinanceExchange {
    /// 파라미터 스토어 경로로 커넥터를 생성합니다.
    pub fn new(credentials: BinanceSsmCredentials) -> ExchangeResult<Self> {
        require("binance", "apiKeyPath", credentials.api_key_path.as_deref())?;
        require("binance", "apiSecretPath", credentials.api_secret_path.as_deref())?;

        debug!(
            api_key_path = credentials.api_key_path.as_deref().unwrap_or_default(),
            "Binance connector configured"
        );
        Ok(Self { credentials })
    }

    /// 바인딩된 자격증명 경로.
    pub fn credentials(&self) -> &BinanceSsmCredentials {
        &self.credentials
    }

    fn not_implemented() -> ExchangeError {
        ExchangeError::NotSupported("Binance exchange not implemented yet".to_string())
    }
}

#[async_trait]
impl Exchange for BinanceExchange {
    fn name(&self) -> &str {
        "binance"
    }

    async fn get_balance(&self, _asset: &str) -> ExchangeResult<Decimal> {
        Err(Self::not_implemented())
    }

    async fn place_market_buy_order(
        &self,
        _symbol: &str,
        _quote_amount: Decimal,
    ) -> ExchangeResult<Order> {
        Err(Self::not_implemented())
    }
}
