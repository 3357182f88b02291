//! DCA 페이로드 파싱.
//!
//! 두 가지 스키마를 지원합니다:
//! - **v2 중첩 스키마**: [`parse`]로 [`TradingInstruction`]을 만든 뒤
//!   [`TradingInstruction::to_normalized_plan`]으로 정규화
//! - **레거시 평면 스키마**: [`parse_legacy`]로 바로 [`NormalizedPlan`](crate::NormalizedPlan) 생성

mod instruction;
mod legacy;
mod unify;

pub use instruction::*;
pub use legacy::*;

/// 지원하는 페이로드 버전.
pub const SUPPORTED_VERSION: &str = "v2";

/// 주문 유형 기본값.
pub const DEFAULT_ORDER_TYPE: &str = "market";

/// JSON `null`을 필드 기본값으로 읽습니다 (`""`, `false`, 빈 bag).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn check_version(version: &str) -> crate::PayloadResult<()> {
    if version.to_lowercase() == SUPPORTED_VERSION {
        Ok(())
    } else {
        Err(crate::PayloadError::UnsupportedVersion(version.to_string()))
    }
}
