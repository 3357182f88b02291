//! 페이로드 파싱 및 정규화 에러 타입.
//!
//! 이 계층의 에러는 모두 잘못되었거나 지원되지 않는 지시를 의미하므로
//! 재시도 대상이 아닙니다.

use thiserror::Error;

/// 페이로드 파싱/정규화 에러.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// JSON 문법 또는 구조 에러
    #[error("invalid JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// 지원하지 않는 버전 (누락 시 빈 문자열)
    #[error("version must be \"v2\", got {0:?}")]
    UnsupportedVersion(String),

    /// 필수 필드 누락
    #[error("{0} is required")]
    MissingField(&'static str),

    /// 소수 파싱 실패 또는 허용되지 않는 값
    #[error("invalid {field}: {value:?}")]
    InvalidAmount { field: &'static str, value: String },
}

/// 페이로드 작업을 위한 Result 타입.
pub type PayloadResult<T> = Result<T, PayloadError>;

impl PayloadError {
    /// 잘못된 금액 에러를 생성합니다.
    pub fn invalid_amount(field: &'static str, value: impl Into<String>) -> Self {
        PayloadError::InvalidAmount {
            field,
            value: value.into(),
        }
    }

    /// 재시도 가능한 에러인지 확인합니다.
    ///
    /// 입력 자체의 문제이므로 항상 `false`입니다.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// 문제가 된 필드 이름을 반환합니다.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PayloadError::MissingField(field) => Some(field),
            PayloadError::InvalidAmount { field, .. } => Some(field),
            PayloadError::MalformedInput(_) | PayloadError::UnsupportedVersion(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_never_retryable() {
        let err = PayloadError::MissingField("exchange.name");
        assert!(!err.is_retryable());

        let err = PayloadError::UnsupportedVersion("v1".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = PayloadError::MissingField("strategy.symbol");
        assert_eq!(err.to_string(), "strategy.symbol is required");

        let err = PayloadError::invalid_amount("dca.quoteAmount", "-5");
        assert_eq!(err.to_string(), "invalid dca.quoteAmount: \"-5\"");
        assert_eq!(err.field(), Some("dca.quoteAmount"));
    }
}
