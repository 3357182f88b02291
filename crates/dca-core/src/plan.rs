//! 정규화된 실행 계획.
//!
//! [`NormalizedPlan`]은 파서가 만든 지시(또는 레거시 페이로드)를 거래소 중립적인
//! 형태로 정리한 결과이며, 실행 계층이 그대로 소비합니다.
//!
//! 자격증명은 거래소별 tagged union([`ExchangeCredentials`])으로 표현합니다.
//! 구성 bag에서 찾지 못했거나 타입이 맞지 않는 값은 빈 문자열이 아니라 `None`입니다.

use rust_decimal::Decimal;
use secrecy::SecretString;

/// Binance 파라미터 스토어 경로.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinanceSsmCredentials {
    pub api_key_path: Option<String>,
    pub api_secret_path: Option<String>,
}

/// OKX 파라미터 스토어 경로.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OkxSsmCredentials {
    pub api_key_path: Option<String>,
    pub api_secret_path: Option<String>,
    pub passphrase_path: Option<String>,
}

/// OKX 인라인 자격증명. 값은 로그에 노출되지 않습니다.
#[derive(Debug, Default)]
pub struct OkxInlineCredentials {
    pub api_key: Option<SecretString>,
    pub api_secret: Option<SecretString>,
    pub passphrase: Option<SecretString>,
}

/// 거래소별 자격증명 레코드.
#[derive(Debug)]
pub enum ExchangeCredentials {
    /// Binance: 파라미터 스토어 경로만 지원
    Binance(BinanceSsmCredentials),
    /// OKX: 경로 레코드는 항상 존재하며, 인라인 자격증명은 선택
    Okx {
        ssm: OkxSsmCredentials,
        inline: Option<OkxInlineCredentials>,
    },
}

impl ExchangeCredentials {
    /// 레코드가 속한 거래소 식별자.
    pub fn exchange(&self) -> &'static str {
        match self {
            ExchangeCredentials::Binance(_) => "binance",
            ExchangeCredentials::Okx { .. } => "okx",
        }
    }
}

/// 텔레그램 알림 대상.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramTarget {
    /// 봇 토큰이 저장된 파라미터 스토어 경로
    pub bot_token_path: Option<String>,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: Option<String>,
    /// 출력 싱크 (`"stdout"` 또는 기본 텔레그램). 레거시 페이로드에서만 채워집니다.
    pub sink: Option<String>,
}

impl TelegramTarget {
    /// 표준 출력 싱크로 지정되었는지 확인합니다.
    pub fn is_stdout_sink(&self) -> bool {
        self.sink.as_deref() == Some("stdout")
    }
}

/// 실행 준비가 끝난 DCA 계획.
#[derive(Debug)]
pub struct NormalizedPlan {
    /// 소문자 거래소 식별자 (예: `binance`)
    pub exchange: String,
    /// 대문자 거래쌍 심볼 (예: `BTC-USDT`)
    pub symbol: String,
    /// 1회 매수에 사용할 호가 통화 금액
    pub quote_amount: Decimal,
    /// 잔고 경고 임계값 (미지정 시 0)
    pub balance_threshold: Decimal,
    /// 드라이런 여부
    pub dry_run: bool,
    /// 거래소별 자격증명 (지원하지 않는 거래소면 `None`)
    pub credentials: Option<ExchangeCredentials>,
    /// 텔레그램 알림 대상
    pub telegram: Option<TelegramTarget>,
}

impl NormalizedPlan {
    /// Binance 자격증명 레코드.
    pub fn binance(&self) -> Option<&BinanceSsmCredentials> {
        match &self.credentials {
            Some(ExchangeCredentials::Binance(creds)) => Some(creds),
            _ => None,
        }
    }

    /// OKX 파라미터 스토어 레코드.
    pub fn okx(&self) -> Option<&OkxSsmCredentials> {
        match &self.credentials {
            Some(ExchangeCredentials::Okx { ssm, .. }) => Some(ssm),
            _ => None,
        }
    }

    /// OKX 인라인 자격증명 레코드.
    pub fn okx_inline(&self) -> Option<&OkxInlineCredentials> {
        match &self.credentials {
            Some(ExchangeCredentials::Okx { inline, .. }) => inline.as_ref(),
            _ => None,
        }
    }

    /// 잔고 경고가 설정되어 있는지 확인합니다.
    pub fn has_balance_alert(&self) -> bool {
        self.balance_threshold > Decimal::ZERO
    }
}
