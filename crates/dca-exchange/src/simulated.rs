//! 드라이런용 시뮬레이션 거래소.
//!
//! 실제 주문을 내지 않고 고정된 잔고와 체결가로 즉시 체결된 주문을 돌려줍니다.
//! 잔고는 체결 후에도 줄어들지 않습니다.

use async_trait::async_trait;
use chrono::Utc;
use dca_core::{DecimalExt, SimulationConfig};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::traits::{Exchange, ExchangeResult, Order, OrderStatus, OrderType, Side};
use crate::ExchangeError;

/// 체결 수량의 소수점 자릿수.
const QUANTITY_DP: u32 = 8;

/// 시뮬레이션 거래소.
#[derive(Debug, Clone)]
pub struct SimulatedExchange {
    balance: Decimal,
    fill_price: Decimal,
}

impl SimulatedExchange {
    /// 새 시뮬레이션 거래소를 생성합니다.
    pub fn new(balance: Decimal, fill_price: Decimal) -> Self {
        Self {
            balance,
            fill_price,
        }
    }

    /// 설정에서 생성합니다.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.balance, config.fill_price)
    }
}

impl Default for SimulatedExchange {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl Exchange for SimulatedExchange {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn get_balance(&self, asset: &str) -> ExchangeResult<Decimal> {
        debug!(asset, balance = %self.balance, "Simulated balance lookup");
        Ok(self.balance)
    }

    async fn place_market_buy_order(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> ExchangeResult<Order> {
        // 금액 검증은 페이로드 계층의 몫이므로 드라이런은 어떤 금액이든 체결
        if !quote_amount.is_strictly_positive() {
            warn!(%quote_amount, "Simulated fill for non-positive quote amount");
        }
        if quote_amount > self.balance {
            warn!(
                %quote_amount,
                balance = %self.balance,
                "Simulated fill exceeds simulated balance"
            );
        }
        if !self.fill_price.is_strictly_positive() {
            return Err(ExchangeError::OrderRejected(format!(
                "no fill price for {}",
                symbol
            )));
        }

        Ok(Order {
            id: format!("sim-{}", uuid::Uuid::new_v4()),
            symbol: symbol.to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: (quote_amount / self.fill_price).round_half_up(QUANTITY_DP),
            price: self.fill_price,
            status: OrderStatus::Filled,
            filled_at: Utc::now(),
        })
    }
}
