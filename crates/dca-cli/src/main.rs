//! DCA 봇 실행 파일.
//!
//! # 사용 예시
//!
//! ```bash
//! # 로컬 테스트 (local_event.json 읽기)
//! dca-bot
//!
//! # 다른 이벤트 파일과 레거시 스키마
//! dca-bot --event events/legacy.json --legacy
//!
//! # 호스팅 런타임 (stdin으로 이벤트 전달)
//! cat event.json | dca-bot --hosted
//! ```

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use dca_cli::{handle_request, ExecutionContext, PayloadSchema, DEFAULT_EVENT_PATH};
use dca_core::{init_logging, AppConfig, LogConfig};
use tracing::{error, info};

/// 텔레그램 봇 토큰 환경 변수.
const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

#[derive(Parser)]
#[command(name = "dca-bot")]
#[command(about = "DCA bot - 정기 시장가 매수 및 잔고 경고", long_about = None)]
#[command(version)]
struct Cli {
    /// 호스팅 런타임에서 실행 (이벤트를 stdin에서 읽음)
    #[arg(long)]
    hosted: bool,

    /// 로컬 실행 시 이벤트 파일 경로
    #[arg(short, long, default_value = DEFAULT_EVENT_PATH, conflicts_with = "hosted")]
    event: PathBuf,

    /// 레거시 평면 스키마로 해석
    #[arg(long)]
    legacy: bool,

    /// 설정 파일 경로 (선택)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn context(&self) -> ExecutionContext {
        if self.hosted {
            ExecutionContext::Hosted
        } else {
            ExecutionContext::Local {
                event_path: self.event.clone(),
            }
        }
    }

    fn schema(&self) -> PayloadSchema {
        if self.legacy {
            PayloadSchema::Legacy
        } else {
            PayloadSchema::Nested
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = cli.context();

    if ctx.is_local() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::load(cli.config.as_ref())?;
    init_logging(LogConfig::from_settings(
        &config.logging,
        ctx.default_log_format(),
    ))
    .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    if let ExecutionContext::Local { event_path } = &ctx {
        info!("🌱 Running in local mode, reading {} …", event_path.display());
    }

    let event = ctx.read_event().await?;
    let bot_token = std::env::var(BOT_TOKEN_ENV).ok();

    match handle_request(&ctx, &event, cli.schema(), &config, bot_token).await {
        Ok(report) => {
            info!(
                order_id = %report.order.id,
                balance_check = ?report.balance_check,
                "DCA invocation completed"
            );
            Ok(())
        }
        Err(e) => {
            error!("error in handle_request: {e:#}");
            Err(e)
        }
    }
}
