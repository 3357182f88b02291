//! 정밀한 금액 처리를 위한 Decimal 유틸리티.

use rust_decimal::Decimal;
use std::str::FromStr;

/// 가격 타입.
pub type Price = Decimal;

/// 주문 수량 타입.
pub type Quantity = Decimal;

/// 문자열을 정확한 소수로 파싱합니다.
///
/// 일반 표기(`"10.00"`, `"-5"`)와 지수 표기(`"1e3"`)를 모두 허용합니다.
/// 앞뒤 공백과 자릿수 구분자(`_`)는 허용하지 않습니다.
///
/// 값이 바뀌는 입력은 거부합니다. 소수부가 28자리를 넘어 반올림되거나
/// `Decimal` 범위(약 ±7.9e28)를 벗어나면 `None`.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.contains('_') {
        return None;
    }

    let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let parsed = Decimal::from_str(mantissa).ok()?;
    let fraction_digits = mantissa.split_once('.').map_or(0, |(_, frac)| frac.len());
    if parsed.scale() as usize != fraction_digits {
        return None;
    }

    match exponent {
        None => Some(parsed),
        Some(_) => Decimal::from_scientific(s).ok(),
    }
}

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다.
    fn is_strictly_positive(&self) -> bool;

    /// 지정된 소수점 자릿수로 반올림합니다.
    fn round_half_up(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }
}
