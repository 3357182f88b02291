//! # DCA Core
//!
//! DCA(정액 분할 매수) 봇의 핵심 타입과 페이로드 정규화 계층을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - v2 페이로드 파싱 및 검증 ([`parse`])
//! - 거래소별 실행 계획으로의 정규화 ([`TradingInstruction::to_normalized_plan`])
//! - 레거시 평면 페이로드 어댑터 ([`parse_legacy`])
//! - 심볼/금액 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod payload;
pub mod plan;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use payload::*;
pub use plan::*;
pub use types::*;
