//! DCA 실행기 통합 테스트

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dca_core::parse;
use dca_exchange::{
    Exchange, ExchangeError, ExchangeResult, Order, OrderStatus, OrderType, Side,
    SimulatedExchange,
};
use dca_execution::{BalanceCheck, DcaRunner, ExecutionError};
use dca_notification::{
    Notification, NotificationError, NotificationEvent, NotificationManager, NotificationResult,
    NotificationSender,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 전송된 알림을 기록하는 테스트용 전송기
#[derive(Clone, Default)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<Notification>>>,
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// 항상 실패하는 전송기
struct FailingSender;

#[async_trait]
impl NotificationSender for FailingSender {
    async fn send(&self, _notification: &Notification) -> NotificationResult<()> {
        Err(NotificationError::SendFailed("502 - Bad Gateway".to_string()))
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// 모든 주문을 거부하는 거래소
struct RejectingExchange;

#[async_trait]
impl Exchange for RejectingExchange {
    fn name(&self) -> &str {
        "rejecting"
    }

    async fn get_balance(&self, _asset: &str) -> ExchangeResult<Decimal> {
        Ok(Decimal::ZERO)
    }

    async fn place_market_buy_order(
        &self,
        symbol: &str,
        _quote_amount: Decimal,
    ) -> ExchangeResult<Order> {
        Err(ExchangeError::OrderRejected(format!("market closed for {symbol}")))
    }
}

/// 주문은 체결되지만 잔고 조회가 실패하는 거래소
struct BalanceOutage;

#[async_trait]
impl Exchange for BalanceOutage {
    fn name(&self) -> &str {
        "outage"
    }

    async fn get_balance(&self, _asset: &str) -> ExchangeResult<Decimal> {
        Err(ExchangeError::NetworkError("timeout".to_string()))
    }

    async fn place_market_buy_order(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> ExchangeResult<Order> {
        Ok(Order {
            id: "o-1".to_string(),
            symbol: symbol.to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: quote_amount,
            price: Decimal::ONE,
            status: OrderStatus::Filled,
            filled_at: Utc::now(),
        })
    }
}

fn plan(symbol: &str, amount: &str, threshold: &str) -> dca_core::NormalizedPlan {
    let raw = serde_json::json!({
        "version": "v2",
        "exchange": { "name": "binance" },
        "strategy": { "symbol": symbol, "quoteAmount": amount, "balanceThreshold": threshold },
        "flags": { "dryRun": true }
    })
    .to_string();
    parse(raw.as_bytes()).unwrap().to_normalized_plan().unwrap()
}

fn runner_with(exchange: Box<dyn Exchange>) -> (DcaRunner, RecordingSender) {
    let recorder = RecordingSender::default();
    let mut manager = NotificationManager::new();
    manager.add_sender(recorder.clone());
    (DcaRunner::new(exchange, manager), recorder)
}

#[tokio::test]
async fn test_low_balance_triggers_alert() {
    let (runner, recorder) = runner_with(Box::new(SimulatedExchange::new(dec!(50), dec!(50000))));

    let report = runner.run(&plan("BTC-USDT", "10", "100")).await.unwrap();

    assert_eq!(report.order.quantity, dec!(0.0002));
    assert_eq!(
        report.balance_check,
        BalanceCheck::Low {
            currency: "USDT".to_string(),
            balance: dec!(50),
            alerted: true
        }
    );

    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(matches!(sent[0].event, NotificationEvent::OrderFilled { dry_run: true, .. }));
    match &sent[1].event {
        NotificationEvent::LowBalance {
            currency,
            threshold,
            ..
        } => {
            assert_eq!(currency, "USDT");
            assert_eq!(*threshold, dec!(100));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_sufficient_balance_sends_no_alert() {
    let (runner, recorder) = runner_with(Box::new(SimulatedExchange::default()));

    let report = runner.run(&plan("ethusdc", "20", "5000")).await.unwrap();
    assert_eq!(
        report.balance_check,
        BalanceCheck::Sufficient {
            currency: "USDC".to_string(),
            balance: dec!(10000)
        }
    );
    assert_eq!(recorder.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_no_threshold_skips_balance_check() {
    let (runner, _) = runner_with(Box::new(SimulatedExchange::default()));
    let report = runner.run(&plan("BTC-USDT", "10", "")).await.unwrap();
    assert_eq!(report.balance_check, BalanceCheck::Skipped);
}

#[tokio::test]
async fn test_balance_failure_does_not_fail_run() {
    let (runner, recorder) = runner_with(Box::new(BalanceOutage));

    let report = runner.run(&plan("BTC-USDT", "10", "100")).await.unwrap();
    assert!(matches!(report.balance_check, BalanceCheck::Failed(_)));
    assert_eq!(recorder.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_quote_currency_is_reported() {
    let (runner, _) = runner_with(Box::new(SimulatedExchange::default()));
    let report = runner.run(&plan("DOGEXYZ", "10", "100")).await.unwrap();

    match report.balance_check {
        BalanceCheck::Failed(message) => assert!(message.contains("DOGEXYZ")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_order_failure_fails_run() {
    let (runner, recorder) = runner_with(Box::new(RejectingExchange));

    let err = runner.run(&plan("BTC-USDT", "10", "100")).await.unwrap_err();
    assert!(matches!(err, ExecutionError::Order(ExchangeError::OrderRejected(_))));
    assert!(recorder.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dry_run_fills_zero_amount() {
    // v2 경로는 0 금액을 허용하고 드라이런은 그대로 체결함
    let (runner, recorder) = runner_with(Box::new(SimulatedExchange::default()));

    let report = runner.run(&plan("BTC-USDT", "0", "")).await.unwrap();
    assert_eq!(report.order.quantity, Decimal::ZERO);
    assert_eq!(recorder.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_undelivered_alert_is_reported() {
    let mut manager = NotificationManager::new();
    manager.add_sender(FailingSender);
    let runner = DcaRunner::new(
        Box::new(SimulatedExchange::new(dec!(50), dec!(50000))),
        manager,
    );

    let report = runner.run(&plan("BTC-USDT", "10", "100")).await.unwrap();
    assert_eq!(
        report.balance_check,
        BalanceCheck::Low {
            currency: "USDT".to_string(),
            balance: dec!(50),
            alerted: false
        }
    );
}
