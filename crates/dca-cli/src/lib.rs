//! DCA 봇 호출 진입점.
//!
//! 실행 컨텍스트(호스팅/로컬)는 CLI 플래그로 결정되어 주입되며,
//! 하나의 호출은 하나의 JSON 이벤트를 처리합니다.

pub mod context;
pub mod handler;

pub use context::*;
pub use handler::*;
