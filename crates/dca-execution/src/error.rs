//! 실행 에러 타입.

use dca_exchange::ExchangeError;
use thiserror::Error;

/// DCA 실행 에러.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// 주문 실패
    #[error("failed to place order: {0}")]
    Order(#[source] ExchangeError),

    /// 잔고 조회 실패
    #[error("failed to get balance: {0}")]
    Balance(#[source] ExchangeError),

    /// 심볼에서 호가 통화를 알 수 없음
    #[error("unable to extract quote currency from symbol: {0}")]
    UnknownQuoteCurrency(String),
}

/// 실행 작업을 위한 Result 타입.
pub type ExecutionResult<T> = Result<T, ExecutionError>;
