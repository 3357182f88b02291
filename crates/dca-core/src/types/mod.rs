//! 페이로드와 실행 계층에서 공통으로 사용하는 타입.

mod decimal;
mod symbol;

pub use decimal::*;
pub use symbol::*;
