//! OKX 커넥터.

use async_trait::async_trait;
use dca_core::{OkxInlineCredentials, OkxSsmCredentials};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::require;
use crate::traits::{Exchange, ExchangeResult, Order};
use crate::ExchangeError;

/// OKX 인증 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OkxAuthMode {
    /// 파라미터 스토어 경로
    ParameterStore,
    /// 페이로드에 포함된 값
    Inline,
}

/// OKX 현물 거래소.
#[derive(Debug)]
pub struct OkxExchange {
    mode: OkxAuthMode,
    ssm: OkxSsmCredentials,
}

impl OkxExchange {
    /// 계획의 OKX 레코드로 커넥터를 생성합니다.
    ///
    /// 인라인 자격증명이 있으면 우선 사용하고, 없으면 경로 레코드를 사용합니다.
    pub fn new(
        ssm: &OkxSsmCredentials,
        inline: Option<&OkxInlineCredentials>,
    ) -> ExchangeResult<Self> {
        let mode = match inline {
            Some(inline) => {
                require("okx", "apiKey", exposed(&inline.api_key))?;
                require("okx", "apiSecret", exposed(&inline.api_secret))?;
                require("okx", "passphrase", exposed(&inline.passphrase))?;
                OkxAuthMode::Inline
            }
            None => {
                require("okx", "apiKeyPath", ssm.api_key_path.as_deref())?;
                require("okx", "apiSecretPath", ssm.api_secret_path.as_deref())?;
                require("okx", "passphrasePath", ssm.passphrase_path.as_deref())?;
                OkxAuthMode::ParameterStore
            }
        };

        debug!(mode = ?mode, "OKX connector configured");
        Ok(Self {
            mode,
            ssm: ssm.clone(),
        })
    }

    /// 선택된 인증 방식.
    pub fn auth_mode(&self) -> OkxAuthMode {
        self.mode
    }

    /// 바인딩된 자격증명 경로.
    pub fn credentials(&self) -> &OkxSsmCredentials {
        &self.ssm
    }

    fn not_implemented() -> ExchangeError {
        ExchangeError::NotSupported("OKX exchange not implemented yet".to_string())
    }
}

fn exposed(secret: &Option<SecretString>) -> Option<&str> {
    secret.as_ref().map(|s| s.expose_secret())
}

#[async_trait]
impl Exchange for OkxExchange {
    fn name(&self) -> &str {
        "okx"
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
