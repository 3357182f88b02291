//! 거래소 에러 타입.

use thiserror::Error;

/// 주문/잔고 요청 실패 원인.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("network error: {0}")]
    NetworkError(String),

    /// 자격증명이 없거나 거부됨
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("order rejected: {0}")]
    OrderRejected(String),

    /// 계획의 거래소 이름을 처리할 커넥터가 없음
    #[error("unsupported exchange: {0}")]
    UnsupportedExchange(String),

    /// 커넥터가 아직 해당 작업을 구현하지 않음
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl ExchangeError {
    /// 같은 요청을 다시 보내면 성공할 수 있는지 여부.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    /// 입력이나 설정을 고치기 전에는 다시 시도해도 실패하는지 여부.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::OrderRejected(_) | Self::UnsupportedExchange(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let network = ExchangeError::NetworkError("timeout".to_string());
        assert!(network.is_retryable());
        assert!(!network.is_fatal());

        let err = ExchangeError::UnsupportedExchange("kraken".to_string());
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "unsupported exchange: kraken");

        let placeholder = ExchangeError::NotSupported("okx".to_string());
        assert!(!placeholder.is_retryable());
        assert!(!placeholder.is_fatal());
    }
}
