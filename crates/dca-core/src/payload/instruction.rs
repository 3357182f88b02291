//! v2 중첩 스키마와 파서/검증기.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::{check_version, null_as_default, DEFAULT_ORDER_TYPE};
use crate::types::parse_decimal;
use crate::{PayloadError, PayloadResult};

/// 자유 형식 키/값 구성.
pub type ConfigBag = Map<String, Value>;

/// 비밀 값의 출처.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// 페이로드에 값이 직접 포함됨
    Inline,
    /// 환경 변수에서 읽음
    Env,
    /// 파라미터 스토어 경로로 조회
    Ssm,
    /// 누락 또는 알 수 없는 태그
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::Inline => write!(f, "inline"),
            CredentialKind::Env => write!(f, "env"),
            CredentialKind::Ssm => write!(f, "ssm"),
            CredentialKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// 태그와 구성 bag으로 이루어진 비밀 값 출처.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretSource {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: CredentialKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ConfigBag,
}

impl SecretSource {
    /// bag에서 문자열 값을 꺼냅니다. 누락되었거나 문자열이 아니면 `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.config
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

/// 거래소 섹션.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeSection {
    /// 거래소 이름 ("binance", "okx")
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials: SecretSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// DCA 전략 섹션. 금액은 정밀도 보존을 위해 문자열로 받습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySection {
    /// 거래쌍 (예: "BTC-USDT")
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    /// 1회 매수 금액 (예: "10.00")
    #[serde(default, deserialize_with = "null_as_default")]
    pub quote_amount: String,
    /// 잔고 경고 임계값 (예: "5000.00")
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance_threshold: String,
    /// 주문 유형 ("market", "limit")
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_type: String,
}

/// 알림 섹션.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<SecretSource>,
}

/// 실행 플래그.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeFlags {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dry_run: bool,
}

/// 검증된 v2 DCA 지시.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingInstruction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exchange: ExchangeSection,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strategy: StrategySection,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notifications: NotificationSection,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: RuntimeFlags,
}

/// v2 페이로드를 파싱하고 검증합니다.
///
/// 금액은 소수로 파싱 가능한지만 확인하며 양수 여부는 검사하지 않습니다.
/// 주문 유형이 비어 있으면 `"market"`으로 채웁니다.
pub fn parse(raw: &[u8]) -> PayloadResult<TradingInstruction> {
    let mut instruction: TradingInstruction = serde_json::from_slice(raw)?;
    instruction.validate()?;

    if instruction.strategy.order_type.is_empty() {
        instruction.strategy.order_type = DEFAULT_ORDER_TYPE.to_string();
    }

    Ok(instruction)
}

impl TradingInstruction {
    fn validate(&self) -> PayloadResult<()> {
        check_version(&self.version)?;

        if self.exchange.name.is_empty() {
            return Err(PayloadError::MissingField("exchange.name"));
        }
        if self.strategy.symbol.is_empty() {
            return Err(PayloadError::MissingField("strategy.symbol"));
        }
        if self.strategy.quote_amount.is_empty() {
            return Err(PayloadError::MissingField("strategy.quoteAmount"));
        }

        if parse_decimal(&self.strategy.quote_amount).is_none() {
            return Err(PayloadError::invalid_amount(
                "quoteAmount",
                &self.strategy.quote_amount,
            ));
        }
        if !self.strategy.balance_threshold.is_empty()
            && parse_decimal(&self.strategy.balance_threshold).is_none()
        {
            return Err(PayloadError::invalid_amount(
                "balanceThreshold",
                &self.strategy.balance_threshold,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(version: &str, name: &str, symbol: &str, amount: &str) -> String {
        serde_json::json!({
            "version": version,
            "exchange": { "name": name },
            "strategy": { "symbol": symbol, "quoteAmount": amount }
        })
        .to_string()
    }

    #[test]
    fn test_order_type_defaults_to_market() {
        let instruction = parse(payload("v2", "binance", "BTC-USDT", "10").as_bytes()).unwrap();
        assert_eq!(instruction.strategy.order_type, "market");
        assert_eq!(instruction.exchange.credentials.kind, CredentialKind::Unknown);
        assert!(!instruction.flags.dry_run);
    }

    #[test]
    fn test_version_is_case_insensitive() {
        assert!(parse(payload("V2", "okx", "BTC-USDT", "10").as_bytes()).is_ok());
    }

    #[test]
    fn test_missing_version() {
        let raw = r#"{"exchange":{"name":"binance"},"strategy":{"symbol":"BTC-USDT","quoteAmount":"10"}}"#;
        match parse(raw.as_bytes()) {
            Err(PayloadError::UnsupportedVersion(found)) => assert_eq!(found, ""),
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = parse(b"{not json").unwrap_err();
        assert!(matches!(err, PayloadError::MalformedInput(_)));
    }

    #[test]
    fn test_explicit_order_type_is_kept() {
        let raw = r#"{"version":"v2","exchange":{"name":"okx"},
            "strategy":{"symbol":"BTC-USDT","quoteAmount":"10","orderType":"limit"}}"#;
        let instruction = parse(raw.as_bytes()).unwrap();
        assert_eq!(instruction.strategy.order_type, "limit");
    }

    #[test]
    fn test_bag_lookup_ignores_non_strings() {
        let source: SecretSource = serde_json::from_str(
            r#"{"type":"ssm","config":{"apiKeyPath":42,"apiSecretPath":"/b"}}"#,
        )
        .unwrap();
        assert_eq!(source.kind, CredentialKind::Ssm);
        assert_eq!(source.get_str("apiKeyPath"), None);
        assert_eq!(source.get_str("apiSecretPath").as_deref(), Some("/b"));
        assert_eq!(source.get_str("missing"), None);
    }

    #[test]
    fn test_unknown_credential_kind() {
        let source: SecretSource = serde_json::from_str(r#"{"type":"vault"}"#).unwrap();
        assert_eq!(source.kind, CredentialKind::Unknown);
    }
}
