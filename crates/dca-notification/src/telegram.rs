//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API의 `sendMessage`로 DCA 체결 및 잔고 경고를 전송합니다.

use async_trait::async_trait;
use dca_core::{TelegramSettings, TelegramTarget};
use tracing::{debug, error, info, warn};

use crate::log_sink::LogSender;
use crate::types::{
    Notification, NotificationError, NotificationEvent, NotificationPriority, NotificationResult,
    NotificationSender,
};

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    pub parse_mode: String,
    /// Bot API 기본 URL
    pub api_base_url: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        let settings = TelegramSettings::default();
        Self {
            bot_token,
            chat_id,
            enabled: settings.enabled,
            parse_mode: settings.parse_mode,
            api_base_url: settings.api_base_url,
        }
    }

    /// 계획의 알림 대상과 배포 설정으로부터 생성합니다.
    ///
    /// 파라미터 스토어 경로는 여기서 조회하지 않으므로 봇 토큰은 호출자가 넘겨야 합니다.
    /// 토큰이나 채팅 ID가 없으면 `None`.
    pub fn from_target(
        target: &TelegramTarget,
        settings: &TelegramSettings,
        bot_token: Option<String>,
    ) -> Option<Self> {
        let bot_token = bot_token.filter(|t| !t.is_empty())?;
        let chat_id = target.chat_id.clone().filter(|c| !c.is_empty())?;

        Some(Self {
            bot_token,
            chat_id,
            enabled: settings.enabled,
            parse_mode: settings.parse_mode.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 알림을 텔레그램 HTML 메시지로 포맷합니다. 이벤트의 문자열 값은 이스케이프됩니다.
    pub fn format_message(&self, notification: &Notification) -> String {
        let priority_emoji = match notification.priority {
            NotificationPriority::Low => "ℹ️",
            NotificationPriority::Normal => "📊",
            NotificationPriority::High => "⚠️",
            NotificationPriority::Critical => "🚨",
        };

        let content = match &notification.event {
            NotificationEvent::OrderFilled {
                exchange,
                symbol,
                quantity,
                price,
                quote_amount,
                order_id,
                dry_run,
            } => {
                let prefix = if *dry_run { "🧪 [DRY RUN] " } else { "🟢 " };
                let exchange = escape_html(exchange);
                let symbol = escape_html(symbol);
                let order_id = escape_html(order_id);
                format!(
                    "{prefix}<b>DCA 매수 체결</b>\n\n\
                     거래소: {exchange}\n\
                     심볼: <code>{symbol}</code>\n\
                     금액: {quote_amount}\n\
                     수량: {quantity}\n\
                     가격: {price}\n\
                     주문ID: <code>{order_id}</code>"
                )
            }

            NotificationEvent::LowBalance {
                exchange,
                symbol,
                currency,
                balance,
                threshold,
            } => {
                let exchange = escape_html(exchange);
                let symbol = escape_html(symbol);
                let currency = escape_html(currency);
                format!(
                    "⚠️ <b>잔고 부족 경고</b>\n\n\
                     거래소: {exchange}\n\
                     심볼: <code>{symbol}</code>\n\
                     현재 잔고: <b>{balance} {currency}</b>\n\
                     임계값: {threshold} {currency}"
                )
            }

            NotificationEvent::Custom { title, message } => {
                format!(
                    "{priority_emoji} <b>{}</b>\n\n{}",
                    escape_html(title),
                    escape_html(message)
                )
            }
        };

        let timestamp = notification.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
        format!("{content}\n\n<i>🕐 {timestamp}</i>")
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base_url, self.config.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": true,
        });

        debug!(chat_id = %self.config.chat_id, "Sending Telegram message");

        let response = self.client.post(&url).json(&params).send().await?;

        if response.status().is_success() {
            info!("Telegram notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!("Telegram rate limited");
                return Err(NotificationError::RateLimited(60));
            }

            error!("Failed to send Telegram message: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!("{} - {}", status, body)))
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }

        let message = self.format_message(notification);
        self.send_message(&message).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.bot_token.is_empty() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

/// 여러 전송기를 관리하는 알림 관리자.
#[derive(Default)]
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 계획의 텔레그램 대상으로 관리자를 구성합니다.
    ///
    /// stdout 싱크는 항상 포함됩니다. 대상이 stdout 싱크로 지정되었거나
    /// 토큰/채팅 ID를 확보할 수 없으면 텔레그램 전송기는 추가하지 않습니다.
    pub fn for_target(
        target: Option<&TelegramTarget>,
        settings: &TelegramSettings,
        bot_token: Option<String>,
    ) -> Self {
        let mut manager = Self::new();
        manager.add_sender(LogSender::new());

        let Some(target) = target else {
            return manager;
        };

        if target.is_stdout_sink() {
            debug!("Telegram target uses stdout sink");
            return manager;
        }

        match TelegramConfig::from_target(target, settings, bot_token) {
            Some(config) => manager.add_sender(TelegramSender::new(config)),
            None => warn!(
                token_path = target.bot_token_path.as_deref().unwrap_or_default(),
                "Telegram target configured but bot token or chat id unavailable; using stdout only"
            ),
        }

        manager
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 활성화된 전송기 이름 목록.
    pub fn sender_names(&self) -> Vec<&str> {
        self.senders
            .iter()
            .filter(|s| s.is_enabled())
            .map(|s| s.name())
            .collect()
    }

    /// 활성화된 모든 전송기를 통해 알림을 전송합니다.
    ///
    /// 하나가 실패해도 나머지 전송기는 계속 시도하며, 실패가 있었다면 첫 에러를 반환합니다.
    pub async fn notify(&self, notification: &Notification) -> NotificationResult<()> {
        let mut first_error = None;

        for sender in self.senders.iter().filter(|s| s.is_enabled()) {
            if let Err(e) = sender.send(notification).await {
                error!("Failed to send notification via {}: {}", sender.name(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Telegram HTML 모드에서 의미를 갖는 문자를 이스케이프합니다.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
