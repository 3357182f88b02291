//! 거래소 trait 정의.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dca_core::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 주문 방향. DCA는 매수만 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
        }
    }
}

/// 주문 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
}

/// 주문 상태. 시장가 매수는 즉시 전량 체결된 주문만 돌려줍니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Filled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Filled => write!(f, "filled"),
        }
    }
}

/// 주문 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 거래소 주문 ID
    pub id: String,
    /// 거래쌍 (예: "BTC-USDT")
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// 체결 수량
    pub quantity: Quantity,
    /// 평균 체결가
    pub price: Price,
    pub status: OrderStatus,
    /// 체결 시각
    pub filled_at: DateTime<Utc>,
}

impl Order {
    /// 체결 금액 (수량 × 가격).
    pub fn notional(&self) -> Decimal {
        self.quantity * self.price
    }
}

/// DCA 실행을 위한 거래소 인터페이스.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// 거래소 이름 반환.
    fn name(&self) -> &str;

    /// 특정 자산의 사용 가능 잔고 조회.
    async fn get_balance(&self, asset: &str) -> ExchangeResult<Decimal>;

    /// 호가 통화 금액만큼 시장가 매수.
    ///
    /// `symbol`은 `BTC-USDT` 형식, `quote_amount`는 지출할 호가 통화 금액입니다.
    async fn place_market_buy_order(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> ExchangeResult<Order>;
}
