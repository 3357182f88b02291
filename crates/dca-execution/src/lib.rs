//! DCA 주문 실행.
//!
//! 정규화된 계획 하나를 받아 다음 순서로 실행합니다:
//! 1. 시장가 매수 주문
//! 2. 체결 알림
//! 3. 잔고 임계값이 설정된 경우 호가 통화 잔고 확인 및 경고

pub mod error;
pub mod runner;

pub use error::*;
pub use runner::*;
