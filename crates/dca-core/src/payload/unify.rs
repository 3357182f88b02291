//! v2 지시를 실행 계획으로 정규화.

use rust_decimal::Decimal;
use secrecy::SecretString;

use super::{CredentialKind, SecretSource, TradingInstruction};
use crate::plan::{
    BinanceSsmCredentials, ExchangeCredentials, NormalizedPlan, OkxInlineCredentials,
    OkxSsmCredentials, TelegramTarget,
};
use crate::types::parse_decimal;
use crate::{PayloadError, PayloadResult};

impl TradingInstruction {
    /// 지시를 [`NormalizedPlan`]으로 변환합니다.
    ///
    /// 검증을 거치지 않은 지시로 호출될 수 있으므로 금액은 다시 파싱합니다.
    /// bag 조회는 실패하지 않으며, 실패할 수 있는 단계는 두 금액 파싱뿐입니다.
    pub fn to_normalized_plan(&self) -> PayloadResult<NormalizedPlan> {
        let quote_amount = parse_decimal(&self.strategy.quote_amount).ok_or_else(|| {
            PayloadError::invalid_amount("quoteAmount", &self.strategy.quote_amount)
        })?;

        let balance_threshold = if self.strategy.balance_threshold.is_empty() {
            Decimal::ZERO
        } else {
            parse_decimal(&self.strategy.balance_threshold).ok_or_else(|| {
                PayloadError::invalid_amount("balanceThreshold", &self.strategy.balance_threshold)
            })?
        };

        let exchange = self.exchange.name.to_lowercase();
        let credentials = exchange_credentials(&exchange, &self.exchange.credentials);

        Ok(NormalizedPlan {
            symbol: self.strategy.symbol.to_uppercase(),
            exchange,
            quote_amount,
            balance_threshold,
            dry_run: self.flags.dry_run,
            credentials,
            telegram: self.notifications.telegram.as_ref().map(telegram_target),
        })
    }
}

/// 거래소와 자격증명 종류의 조합별로 레코드를 만듭니다.
///
/// 알 수 없는 거래소는 레코드 없이 통과시킵니다. 지원 여부는 실행 계층이 판단합니다.
fn exchange_credentials(exchange: &str, source: &SecretSource) -> Option<ExchangeCredentials> {
    match exchange {
        "binance" => {
            let ssm = match source.kind {
                CredentialKind::Ssm => BinanceSsmCredentials {
                    api_key_path: source.get_str("apiKeyPath"),
                    api_secret_path: source.get_str("apiSecretPath"),
                },
                CredentialKind::Inline | CredentialKind::Env | CredentialKind::Unknown => {
                    BinanceSsmCredentials::default()
                }
            };
            Some(ExchangeCredentials::Binance(ssm))
        }
        "okx" => {
            let (ssm, inline) = match source.kind {
                CredentialKind::Ssm => (
                    OkxSsmCredentials {
                        api_key_path: source.get_str("apiKeyPath"),
                        api_secret_path: source.get_str("apiSecretPath"),
                        passphrase_path: source.get_str("passphrasePath"),
                    },
                    None,
                ),
                CredentialKind::Inline => (
                    OkxSsmCredentials::default(),
                    Some(OkxInlineCredentials {
                        api_key: secret(source, "apiKey"),
                        api_secret: secret(source, "apiSecret"),
                        passphrase: secret(source, "passphrase"),
                    }),
                ),
                CredentialKind::Env | CredentialKind::Unknown => {
                    (OkxSsmCredentials::default(), None)
                }
            };
            Some(ExchangeCredentials::Okx { ssm, inline })
        }
        _ => None,
    }
}

fn secret(source: &SecretSource, key: &str) -> Option<SecretString> {
    source.get_str(key).map(SecretString::from)
}

fn telegram_target(source: &SecretSource) -> TelegramTarget {
    let bot_token_path = match source.kind {
        CredentialKind::Ssm => source.get_str("botTokenPath"),
        // inline/env 토큰은 아직 계획에 싣지 않음
        CredentialKind::Inline | CredentialKind::Env | CredentialKind::Unknown => None,
    };

    TelegramTarget {
        bot_token_path,
        chat_id: source.get_str("chatId"),
        sink: None,
    }
}
