//! 실행 계획으로부터 거래소 인스턴스 선택.

use dca_core::{ExchangeCredentials, NormalizedPlan, SimulationConfig};
use tracing::info;

use crate::connector::{BinanceExchange, OkxExchange};
use crate::simulated::SimulatedExchange;
use crate::traits::{Exchange, ExchangeResult};
use crate::ExchangeError;

/// 계획에 맞는 거래소를 생성합니다.
///
/// - 드라이런이면 거래소 종류와 무관하게 [`SimulatedExchange`]
/// - `binance` / `okx`는 계획의 자격증명 레코드로 커넥터 생성
/// - 그 외 거래소는 `UnsupportedExchange`
pub fn connect(
    plan: &NormalizedPlan,
    simulation: &SimulationConfig,
) -> ExchangeResult<Box<dyn Exchange>> {
    if plan.dry_run {
        info!(exchange = %plan.exchange, "Dry run: using simulated exchange");
        return Ok(Box::new(SimulatedExchange::from_config(simulation)));
    }

    match (plan.exchange.as_str(), &plan.credentials) {
        ("binance", Some(ExchangeCredentials::Binance(creds))) => {
            Ok(Box::new(BinanceExchange::new(creds.clone())?))
        }
        ("okx", Some(ExchangeCredentials::Okx { ssm, inline })) => {
            Ok(Box::new(OkxExchange::new(ssm, inline.as_ref())?))
        }
        ("binance" | "okx", _) => Err(ExchangeError::Unauthorized(format!(
            "no credentials configured for {}",
            plan.exchange
        ))),
        (other, _) => Err(ExchangeError::UnsupportedExchange(other.to_string())),
    }
}
