//! # DCA Notification
//!
//! 운영자 알림 서비스.
//!
//! 지원 채널:
//! - Telegram (Bot API)
//! - stdout (tracing 로그로 출력)

pub mod log_sink;
pub mod telegram;
pub mod types;

pub use log_sink::*;
pub use telegram::*;
pub use types::*;
