//! stdout 싱크.
//!
//! 알림을 tracing 이벤트로 출력합니다. 텔레그램이 설정되지 않았거나
//! 레거시 페이로드에서 `sink: "stdout"`을 지정한 경우 사용됩니다.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::types::{Notification, NotificationEvent, NotificationResult, NotificationSender};

/// 로그 기반 알림 전송기.
#[derive(Debug, Clone, Default)]
pub struct LogSender;

impl LogSender {
    pub fn new() -> Self {
        Self
    }

    /// 알림을 한 줄 요약으로 포맷합니다.
    pub fn summarize(notification: &Notification) -> String {
        match &notification.event {
            NotificationEvent::OrderFilled {
                exchange,
                symbol,
                quantity,
                price,
                order_id,
                dry_run,
                ..
            } => {
                let mode = if *dry_run { " (dry run)" } else { "" };
                format!(
                    "Order {order_id} filled on {exchange}{mode}: {quantity} {symbol} @ {price}"
                )
            }
            NotificationEvent::LowBalance {
                exchange,
                currency,
                balance,
                threshold,
                ..
            } => format!(
                "Low {currency} balance on {exchange}: {balance} < {threshold}"
            ),
            NotificationEvent::Custom { title, message } => format!("{title}: {message}"),
        }
    }
}

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        let summary = Self::summarize(notification);
        match notification.event {
            NotificationEvent::LowBalance { .. } => {
                warn!(id = %notification.id, priority = ?notification.priority, "{}", summary)
            }
            _ => info!(id = %notification.id, priority = ?notification.priority, "{}", summary),
        }
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summarize_low_balance() {
        let n = Notification::new(NotificationEvent::LowBalance {
            exchange: "binance".to_string(),
            symbol: "BTC-USDT".to_string(),
            currency: "USDT".to_string(),
            balance: dec!(40),
            threshold: dec!(100),
        });
        assert_eq!(
            LogSender::summarize(&n),
            "Low USDT balance on binance: 40 < 100"
        );
    }

    #[tokio::test]
    async fn test_send_always_succeeds() {
        let n = Notification::new(NotificationEvent::Custom {
            title: "hello".to_string(),
            message: "world".to_string(),
        });
        assert!(LogSender::new().send(&n).await.is_ok());
    }
}
