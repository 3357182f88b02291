//! 거래소 연결 계층.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Exchange trait: DCA 실행에 필요한 최소 거래소 인터페이스
//! - 시뮬레이션 거래소 (드라이런용)
//! - Binance / OKX 커넥터 (자격증명 바인딩만 구현, 주문 API는 미구현)
//! - 실행 계획으로부터 거래소를 선택하는 팩토리

pub mod connector;
pub mod error;
pub mod factory;
pub mod simulated;
pub mod traits;

pub use connector::{BinanceExchange, OkxAuthMode, OkxExchange};
pub use error::*;
pub use factory::connect;
pub use simulated::SimulatedExchange;
pub use traits::*;
