//! 이벤트 처리.

use anyhow::Context;
use dca_core::{parse, parse_legacy, AppConfig, NormalizedPlan};
use dca_exchange::connect;
use dca_execution::{DcaRunner, RunReport};
use dca_notification::NotificationManager;
use tracing::info;

use crate::ExecutionContext;

/// 이벤트 페이로드 스키마.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadSchema {
    /// v2 중첩 스키마
    #[default]
    Nested,
    /// 레거시 평면 스키마
    Legacy,
}

/// 이벤트를 정규화된 계획으로 변환합니다.
pub fn build_plan(event: &[u8], schema: PayloadSchema) -> anyhow::Result<NormalizedPlan> {
    match schema {
        PayloadSchema::Nested => {
            let instruction = parse(event).context("failed to parse payload")?;

            info!(
                exchange = %instruction.exchange.name,
                symbol = %instruction.strategy.symbol,
                quote_amount = %instruction.strategy.quote_amount,
                balance_threshold = %instruction.strategy.balance_threshold,
                order_type = %instruction.strategy.order_type,
                dry_run = instruction.flags.dry_run,
                credential_type = %instruction.exchange.credentials.kind,
                telegram = ?instruction.notifications.telegram.as_ref().map(|t| t.kind),
                "📊 Parsed DCA configuration"
            );

            instruction
                .to_normalized_plan()
                .context("failed to convert to normalized plan")
        }
        PayloadSchema::Legacy => {
            let plan = parse_legacy(event).context("failed to parse legacy payload")?;
            info!(
                exchange = %plan.exchange,
                symbol = %plan.symbol,
                quote_amount = %plan.quote_amount,
                balance_threshold = %plan.balance_threshold,
                dry_run = plan.dry_run,
                "📊 Parsed legacy DCA configuration"
            );
            Ok(plan)
        }
    }
}

/// 하나의 호출을 처리합니다.
///
/// `bot_token`은 텔레그램 전송에 사용할 토큰이며, 없으면 stdout 싱크만 사용합니다.
pub async fn handle_request(
    ctx: &ExecutionContext,
    event: &[u8],
    schema: PayloadSchema,
    config: &AppConfig,
    bot_token: Option<String>,
) -> anyhow::Result<RunReport> {
    let plan = build_plan(event, schema)?;

    info!(
        context = ?ctx,
        "🚀 DCA Bot processing {} on {} (dry run: {})",
        plan.symbol, plan.exchange, plan.dry_run
    );

    let exchange = connect(&plan, &config.simulation).context("failed to create exchange")?;
    let notifier =
        NotificationManager::for_target(plan.telegram.as_ref(), &config.telegram, bot_token);
    info!(senders = ?notifier.sender_names(), "Notification senders ready");

    let runner = DcaRunner::new(exchange, notifier);
    runner.run(&plan).await.context("DCA strategy failed")
}
