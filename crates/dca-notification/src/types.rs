//! 알림 타입 및 trait 정의.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 알림 우선순위 레벨.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// 정보성
    Low,
    /// 일반 업데이트
    #[default]
    Normal,
    /// 중요 이벤트
    High,
    /// 즉시 대응 필요
    Critical,
}

/// 알림 이벤트 타입.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// DCA 매수 체결
    OrderFilled {
        exchange: String,
        symbol: String,
        quantity: Decimal,
        price: Decimal,
        quote_amount: Decimal,
        order_id: String,
        dry_run: bool,
    },
    /// 매수 후 잔고가 임계값 아래로 떨어짐
    LowBalance {
        exchange: String,
        symbol: String,
        currency: String,
        balance: Decimal,
        threshold: Decimal,
    },
    /// 사용자 정의 알림
    Custom { title: String, message: String },
}

/// 알림 메시지.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// 고유 알림 ID
    pub id: String,
    pub event: NotificationEvent,
    pub priority: NotificationPriority,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// 새 알림을 생성합니다.
    pub fn new(event: NotificationEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event,
            priority: NotificationPriority::Normal,
            timestamp: Utc::now(),
        }
    }

    /// 우선순위 레벨을 설정합니다.
    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification send failed: {0}")]
    SendFailed(String),

    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// 알림 전송기 trait.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 알림을 전송합니다.
    async fn send(&self, notification: &Notification) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = NotificationEvent::LowBalance {
            exchange: "okx".to_string(),
            symbol: "BTC-USDT".to_string(),
            currency: "USDT".to_string(),
            balance: dec!(10),
            threshold: dec!(100),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "low_balance");
        assert_eq!(value["currency"], "USDT");
    }

    #[test]
    fn test_notification_defaults() {
        let n = Notification::new(NotificationEvent::Custom {
            title: "t".to_string(),
            message: "m".to_string(),
        });
        assert_eq!(n.priority, NotificationPriority::Normal);
        let n = n.with_priority(NotificationPriority::High);
        assert_eq!(n.priority, NotificationPriority::High);
    }
}
