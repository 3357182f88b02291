//! 레거시 평면 스키마 어댑터.
//!
//! 이전 페이로드 생산자와의 호환을 위해 유지합니다. 거래소가 문자열 하나이고,
//! 자격증명과 알림이 거래소별 고정 구조체 필드에 들어 있습니다.

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;

use super::{check_version, null_as_default};
use crate::plan::{
    BinanceSsmCredentials, ExchangeCredentials, NormalizedPlan, OkxInlineCredentials,
    OkxSsmCredentials, TelegramTarget,
};
use crate::types::{parse_decimal, DecimalExt, TradingPair};
use crate::{PayloadError, PayloadResult};

/// 레거시 DCA 페이로드.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyInstruction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exchange: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dca: LegacyDca,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials: LegacyCredentials,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notifications: LegacyNotifications,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: LegacyFlags,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDca {
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_asset: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quote_amount: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance_threshold: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyCredentials {
    pub okx: Option<LegacyOkxCredentials>,
    pub binance: Option<LegacyBinanceCredentials>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOkxCredentials {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_secret_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passphrase_path: String,
    pub inline: Option<LegacyOkxInline>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOkxInline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_secret: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passphrase: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBinanceCredentials {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_secret_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyNotifications {
    pub telegram: Option<LegacyTelegram>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyTelegram {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        rename = "botTokenPath",
        alias = "BotTokenPath"
    )]
    pub bot_token_path: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        rename = "chatID",
        alias = "chatId",
        alias = "ChatID",
        alias = "chat_id"
    )]
    pub chat_id: String,
    /// "stdout" 또는 기본 텔레그램
    #[serde(default, deserialize_with = "null_as_default")]
    pub sink: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFlags {
    #[serde(default, deserialize_with = "null_as_default", alias = "DryRun")]
    pub dry_run: bool,
}

/// 레거시 페이로드를 파싱하여 바로 [`NormalizedPlan`]을 만듭니다.
///
/// v2 경로와 달리 매수 금액은 0보다 커야 합니다.
pub fn parse_legacy(raw: &[u8]) -> PayloadResult<NormalizedPlan> {
    let legacy: LegacyInstruction = serde_json::from_slice(raw)?;
    legacy.into_plan()
}

impl LegacyInstruction {
    /// 레거시 페이로드를 정규화합니다.
    pub fn into_plan(self) -> PayloadResult<NormalizedPlan> {
        check_version(&self.version)?;

        let exchange = self.exchange.trim().to_lowercase();
        if exchange.is_empty() {
            return Err(PayloadError::MissingField("exchange"));
        }

        let symbol = self.dca.resolve_symbol()?;

        let quote_amount = parse_decimal(&self.dca.quote_amount)
            .filter(|amount| amount.is_strictly_positive())
            .ok_or_else(|| PayloadError::invalid_amount("dca.quoteAmount", &self.dca.quote_amount))?;

        let threshold = self.dca.balance_threshold.trim();
        let balance_threshold = if threshold.is_empty() {
            Decimal::ZERO
        } else {
            parse_decimal(threshold)
                .ok_or_else(|| PayloadError::invalid_amount("dca.balanceThreshold", threshold))?
        };

        let credentials = self.credentials.for_exchange(&exchange);
        let telegram = self.notifications.telegram.map(|t| TelegramTarget {
            bot_token_path: non_empty(t.bot_token_path),
            chat_id: non_empty(t.chat_id),
            sink: non_empty(t.sink.trim().to_lowercase()),
        });

        Ok(NormalizedPlan {
            exchange,
            symbol,
            quote_amount,
            balance_threshold,
            dry_run: self.flags.dry_run,
            credentials,
            telegram,
        })
    }
}

impl LegacyDca {
    /// `symbol`을 우선 사용하고, 없으면 `targetAsset-orderCurrency`로 조합합니다.
    fn resolve_symbol(&self) -> PayloadResult<String> {
        let symbol = self.symbol.trim().to_uppercase();
        if !symbol.is_empty() {
            return Ok(symbol);
        }

        if self.target_asset.is_empty() || self.order_currency.is_empty() {
            return Err(PayloadError::MissingField(
                "dca.symbol or (dca.targetAsset+orderCurrency)",
            ));
        }

        Ok(TradingPair::new(&self.target_asset, &self.order_currency).to_string())
    }
}

impl LegacyCredentials {
    /// 계획의 거래소에 해당하는 블록만 레코드로 옮깁니다.
    fn for_exchange(self, exchange: &str) -> Option<ExchangeCredentials> {
        match exchange {
            "binance" => self.binance.map(|b| {
                ExchangeCredentials::Binance(BinanceSsmCredentials {
                    api_key_path: non_empty(b.api_key_path),
                    api_secret_path: non_empty(b.api_secret_path),
                })
            }),
            "okx" => self.okx.map(|o| ExchangeCredentials::Okx {
                ssm: OkxSsmCredentials {
                    api_key_path: non_empty(o.api_key_path),
                    api_secret_path: non_empty(o.api_secret_path),
                    passphrase_path: non_empty(o.passphrase_path),
                },
                inline: o.inline.map(|i| OkxInlineCredentials {
                    api_key: non_empty(i.api_key).map(SecretString::from),
                    api_secret: non_empty(i.api_secret).map(SecretString::from),
                    passphrase: non_empty(i.passphrase).map(SecretString::from),
                }),
            }),
            _ => None,
        }
    }
}

/// 레거시 스키마의 빈 문자열은 값이 없는 것으로 취급합니다.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
