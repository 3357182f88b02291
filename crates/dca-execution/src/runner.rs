//! DCA 실행기.

use dca_core::{quote_currency, NormalizedPlan};
use dca_exchange::{Exchange, Order};
use dca_notification::{
    Notification, NotificationEvent, NotificationManager, NotificationPriority,
};
use rust_decimal::Decimal;
use tracing::{info, warn, Instrument};

use crate::{ExecutionError, ExecutionResult};

/// 매수 후 잔고 확인 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceCheck {
    /// 임계값이 설정되지 않음
    Skipped,
    /// 잔고가 임계값 이상
    Sufficient { currency: String, balance: Decimal },
    /// 잔고가 임계값 미만. `alerted`는 모든 전송기가 경고를 전달했는지 여부
    Low {
        currency: String,
        balance: Decimal,
        alerted: bool,
    },
    /// 확인 실패 (주문은 이미 성공)
    Failed(String),
}

/// 1회 실행 결과.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub order: Order,
    pub balance_check: BalanceCheck,
}

/// 정규화된 계획을 거래소와 알림 관리자로 실행합니다.
pub struct DcaRunner {
    exchange: Box<dyn Exchange>,
    notifier: NotificationManager,
}

impl DcaRunner {
    /// 새 실행기를 생성합니다.
    pub fn new(exchange: Box<dyn Exchange>, notifier: NotificationManager) -> Self {
        Self { exchange, notifier }
    }

    /// DCA 전략을 실행합니다.
    ///
    /// 주문 실패만 에러로 반환합니다. 주문 이후 단계(알림, 잔고 확인)의 실패는
    /// 경고로 기록하고 결과에 반영합니다.
    pub async fn run(&self, plan: &NormalizedPlan) -> ExecutionResult<RunReport> {
        let span = dca_core::dca_span!("dca_run", plan.exchange, plan.symbol, plan.dry_run);
        self.run_inner(plan).instrument(span).await
    }

    async fn run_inner(&self, plan: &NormalizedPlan) -> ExecutionResult<RunReport> {
        if plan.dry_run {
            info!(
                "🧪 DRY RUN: Simulating market buy order for {} {}",
                plan.quote_amount, plan.symbol
            );
        } else {
            info!(
                "📈 Placing market buy order: {} {}",
                plan.quote_amount, plan.symbol
            );
        }

        let order = self
            .exchange
            .place_market_buy_order(&plan.symbol, plan.quote_amount)
            .await
            .map_err(ExecutionError::Order)?;

        info!(
            order_id = %order.id,
            quantity = %order.quantity,
            price = %order.price,
            status = %order.status,
            "✅ Order executed"
        );

        let filled = Notification::new(NotificationEvent::OrderFilled {
            exchange: plan.exchange.clone(),
            symbol: order.symbol.clone(),
            quantity: order.quantity,
            price: order.price,
            quote_amount: plan.quote_amount,
            order_id: order.id.clone(),
            dry_run: plan.dry_run,
        });
        if let Err(e) = self.notifier.notify(&filled).await {
            warn!("⚠️ Order notification failed: {}", e);
        }

        let balance_check = if plan.has_balance_alert() {
            match self.check_balance_and_notify(plan).await {
                Ok(check) => check,
                Err(e) => {
                    warn!("⚠️ Balance check failed: {}", e);
                    BalanceCheck::Failed(e.to_string())
                }
            }
        } else {
            BalanceCheck::Skipped
        };

        Ok(RunReport {
            order,
            balance_check,
        })
    }

    /// 호가 통화 잔고를 확인하고 임계값 미만이면 경고를 전송합니다.
    ///
    /// 경고 전송 실패는 에러가 아니라 `alerted: false`로 보고됩니다.
    pub async fn check_balance_and_notify(
        &self,
        plan: &NormalizedPlan,
    ) -> ExecutionResult<BalanceCheck> {
        let currency = quote_currency(&plan.symbol)
            .ok_or_else(|| ExecutionError::UnknownQuoteCurrency(plan.symbol.clone()))?;

        let balance = self
            .exchange
            .get_balance(&currency)
            .await
            .map_err(ExecutionError::Balance)?;

        info!("💰 Current {} balance after order: {}", currency, balance);

        if balance >= plan.balance_threshold {
            info!(
                "✅ Balance is sufficient: {} >= {} (threshold)",
                balance, plan.balance_threshold
            );
            return Ok(BalanceCheck::Sufficient { currency, balance });
        }

        warn!(
            "⚠️ Balance is below threshold: {} < {}",
            balance, plan.balance_threshold
        );

        let alert = Notification::new(NotificationEvent::LowBalance {
            exchange: plan.exchange.clone(),
            symbol: plan.symbol.clone(),
            currency: currency.clone(),
            balance,
            threshold: plan.balance_threshold,
        })
        .with_priority(NotificationPriority::High);

        let alerted = match self.notifier.notify(&alert).await {
            Ok(()) => true,
            Err(e) => {
                warn!("⚠️ Low balance alert was not fully delivered: {}", e);
                false
            }
        };

        Ok(BalanceCheck::Low {
            currency,
            balance,
            alerted,
        })
    }
}
