//! 실행 컨텍스트.

use std::path::PathBuf;

use anyhow::Context;
use dca_core::LogFormat;
use tokio::io::AsyncReadExt;

/// 로컬 실행 시 기본 이벤트 파일.
pub const DEFAULT_EVENT_PATH: &str = "local_event.json";

/// 호출이 실행되는 환경.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// 호스팅 함수 런타임. 이벤트는 stdin으로 전달됩니다.
    Hosted,
    /// 로컬 테스트. 이벤트를 파일에서 읽습니다.
    Local { event_path: PathBuf },
}

impl ExecutionContext {
    /// 로그 형식 설정이 없을 때 사용할 기본 형식.
    pub fn default_log_format(&self) -> LogFormat {
        match self {
            Self::Hosted => LogFormat::Json,
            Self::Local { .. } => LogFormat::Pretty,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// 이벤트 본문을 읽습니다.
    pub async fn read_event(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Hosted => {
                let mut buf = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut buf)
                    .await
                    .context("failed to read event from stdin")?;
                Ok(buf)
            }
            Self::Local { event_path } => tokio::fs::read(event_path)
                .await
                .with_context(|| format!("failed to read event file {}", event_path.display())),
        }
    }
}
