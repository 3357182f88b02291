//! 설정 관리.
//!
//! 호출마다 바뀌는 값은 페이로드로 들어오고, 이 모듈은 배포 단위로 고정되는
//! 설정(로깅, 드라이런 시뮬레이션 값, 텔레그램 API)을 다룹니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 환경 변수 오버라이드 접두사 (예: `DCA__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "DCA";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 드라이런 시뮬레이션 설정
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// 텔레그램 전송 설정
    #[serde(default)]
    pub telegram: TelegramSettings,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact). 없으면 실행 환경에 따라 결정
    #[serde(default)]
    pub format: Option<String>,
    /// span 생성/종료 이벤트 출력 여부
    #[serde(default)]
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
            span_events: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 드라이런 시 사용하는 시뮬레이션 거래소 값.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// 모든 자산에 대해 보고할 잔고
    #[serde(default = "default_sim_balance")]
    pub balance: Decimal,
    /// 체결 가격
    #[serde(default = "default_sim_fill_price")]
    pub fill_price: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            balance: default_sim_balance(),
            fill_price: default_sim_fill_price(),
        }
    }
}

fn default_sim_balance() -> Decimal {
    Decimal::new(10000, 0)
}

fn default_sim_fill_price() -> Decimal {
    Decimal::new(50000, 0)
}

/// 텔레그램 Bot API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramSettings {
    /// 전송 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bot API 기본 URL
    #[serde(default = "default_telegram_api")]
    pub api_base_url: String,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: default_telegram_api(),
            parse_mode: default_parse_mode(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}
fn default_parse_mode() -> String {
    "HTML".to_string()
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 기본값과 환경 변수만으로 설정을 구성합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.format.is_none());
        assert_eq!(config.simulation.balance, dec!(10000));
        assert_eq!(config.simulation.fill_price, dec!(50000));
        assert_eq!(config.telegram.api_base_url, "https://api.telegram.org");
        assert!(config.telegram.enabled);
    }

    #[test]
    fn test_load_without_file() {
        let config = AppConfig::load(None::<&str>).unwrap();
        assert_eq!(config.telegram.parse_mode, "HTML");
    }

    #[test]
    fn test_load_missing_file_is_optional() {
        let config = AppConfig::load(Some("does/not/exist.toml")).unwrap();
        assert_eq!(config.simulation.fill_price, dec!(50000));
    }
}
