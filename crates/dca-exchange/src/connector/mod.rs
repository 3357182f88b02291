//! 실거래소 커넥터.
//!
//! 현재는 계획의 자격증명을 검증하고 보관하는 단계까지만 구현되어 있으며,
//! 주문/잔고 API 호출은 `NotSupported`를 반환합니다.

mod binance;
mod okx;

pub use binance::BinanceExchange;
pub use okx::{OkxAuthMode, OkxExchange};

use crate::ExchangeError;

/// 필수 자격증명 필드가 채워져 있는지 확인합니다.
fn require(exchange: &str, field: &str, value: Option<&str>) -> Result<(), ExchangeError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ExchangeError::Unauthorized(format!(
            "{} credentials missing {}",
            exchange, field
        ))),
    }
}
