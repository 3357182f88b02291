//! 호출 처리 통합 테스트

use std::path::PathBuf;

use dca_cli::{handle_request, ExecutionContext, PayloadSchema};
use dca_core::AppConfig;
use dca_execution::BalanceCheck;
use rust_decimal_macros::dec;

fn local() -> ExecutionContext {
    ExecutionContext::Local {
        event_path: PathBuf::from("local_event.json"),
    }
}

#[tokio::test]
async fn test_dry_run_nested_event() {
    let event = serde_json::json!({
        "version": "v2",
        "exchange": {
            "name": "binance",
            "credentials": { "type": "ssm", "config": { "apiKeyPath": "/k", "apiSecretPath": "/s" } }
        },
        "strategy": { "symbol": "BTC-USDT", "quoteAmount": "100", "balanceThreshold": "20000" },
        "notifications": { "telegram": { "type": "ssm", "config": { "chatId": "42" } } },
        "flags": { "dryRun": true }
    })
    .to_string();

    let report = handle_request(
        &local(),
        event.as_bytes(),
        PayloadSchema::Nested,
        &AppConfig::default(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(report.order.quantity, dec!(0.002));
    assert!(report.order.id.starts_with("sim-"));
    assert_eq!(
        report.balance_check,
        BalanceCheck::Low {
            currency: "USDT".to_string(),
            balance: dec!(10000),
            alerted: true
        }
    );
}

#[tokio::test]
async fn test_dry_run_legacy_event() {
    let event = serde_json::json!({
        "version": "v2",
        "exchange": "okx",
        "dca": { "targetAsset": "eth", "orderCurrency": "usdc", "quoteAmount": "50" },
        "notifications": { "telegram": { "chatID": "1", "sink": "stdout" } },
        "flags": { "dryRun": true }
    })
    .to_string();

    let report = handle_request(
        &ExecutionContext::Hosted,
        event.as_bytes(),
        PayloadSchema::Legacy,
        &AppConfig::default(),
        Some("token".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(report.order.symbol, "ETH-USDC");
    assert_eq!(report.balance_check, BalanceCheck::Skipped);
}

#[tokio::test]
async fn test_dry_run_above_simulated_balance_fills() {
    let event = br#"{"version":"v2","exchange":{"name":"okx"},"strategy":{"symbol":"BTC-USDT","quoteAmount":"20000"},"flags":{"dryRun":true}}"#;

    let report = handle_request(
        &local(),
        event,
        PayloadSchema::Nested,
        &AppConfig::default(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(report.order.quantity, dec!(0.4));
}

#[tokio::test]
async fn test_live_run_without_credentials_fails() {
    let event = br#"{"version":"v2","exchange":{"name":"binance"},"strategy":{"symbol":"BTC-USDT","quoteAmount":"10"}}"#;

    let err = handle_request(
        &local(),
        event,
        PayloadSchema::Nested,
        &AppConfig::default(),
        None,
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to create exchange"));
}

#[tokio::test]
async fn test_unsupported_exchange_fails() {
    let event = br#"{"version":"v2","exchange":{"name":"kraken"},"strategy":{"symbol":"BTC-USD","quoteAmount":"10"}}"#;

    let err = handle_request(
        &local(),
        event,
        PayloadSchema::Nested,
        &AppConfig::default(),
        None,
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("kraken"));
}

#[tokio::test]
async fn test_legacy_rejects_zero_amount() {
    let event = br#"{"version":"v2","exchange":"binance","dca":{"symbol":"BTCUSDT","quoteAmount":"0"},"flags":{"dryRun":true}}"#;

    let err = handle_request(
        &local(),
        event,
        PayloadSchema::Legacy,
        &AppConfig::default(),
        None,
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("dca.quoteAmount"));
}
