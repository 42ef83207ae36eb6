//! 백엔드와 주고받는 캔들 데이터.
//!
//! - `Kline` - `/klinesWithAlgorithm`, `/multi` 응답 캔들. `/backtest` 요청 본문으로 그대로 되돌려 보냅니다.
//! - `AnnotatedKline` - `/backtest` 응답 캔들. 누적 수익률이 반드시 포함됩니다.
//! - `SignalMarker` - 매매 이벤트가 발생한 봉에만 존재하는 신호 표시.
//!   키가 있으면 값이 `null`이어도 신호가 있는 것으로 봅니다.
//!
//! 두 캔들 타입 모두 알지 못하는 필드(OHLCV 등)를 `fields`에 보관하므로
//! 왕복 직렬화에서 값이 유실되지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 캔들 시간 정보 (epoch 밀리초).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlineTimes {
    /// 캔들 시작 시간
    pub open: i64,
    /// 캔들 종료 시간
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<i64>,
}

impl KlineTimes {
    /// 시작 시간만 가진 시간 정보를 생성합니다.
    pub fn open_at(open: i64) -> Self {
        Self { open, close: None }
    }
}

/// 매매 신호 표시.
///
/// 백엔드가 보내는 값의 형태(문자열, 객체, `null`)는 그대로 보존합니다.
/// 이 크레이트에서 의미를 갖는 것은 키의 존재 여부뿐입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalMarker(pub Value);

impl SignalMarker {
    /// 문자열 신호라면 그 값을 반환합니다 (예: "BUY").
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }
}

impl From<&str> for SignalMarker {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

/// `signal` 키가 있으면 값과 관계없이 `Some`으로 읽습니다.
///
/// 키가 없을 때는 `#[serde(default)]`에 의해 `None`이 됩니다.
fn present_signal<'de, D>(deserializer: D) -> Result<Option<SignalMarker>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| Some(SignalMarker(value)))
}

/// 시작 시간을 가진 캔들.
pub trait Timestamped {
    /// 캔들 시작 시간 (epoch 밀리초).
    fn open_time(&self) -> i64;
}

/// 알고리즘 신호가 붙은 캔들.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// 시간 정보
    pub times: KlineTimes,
    /// 매매 신호 (신호가 발생한 봉에만 존재)
    #[serde(
        default,
        deserialize_with = "present_signal",
        skip_serializing_if = "Option::is_none"
    )]
    pub signal: Option<SignalMarker>,
    /// 그 밖의 필드 (시가/고가/저가/종가/거래량 등)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Kline {
    /// 시작 시간만 가진 캔들을 생성합니다.
    pub fn new(open_time: i64) -> Self {
        Self {
            times: KlineTimes::open_at(open_time),
            signal: None,
            fields: Map::new(),
        }
    }

    /// 매매 신호를 설정합니다.
    pub fn with_signal(mut self, signal: impl Into<SignalMarker>) -> Self {
        self.signal = Some(signal.into());
        self
    }

    /// 추가 필드를 설정합니다.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// 매매 신호가 있는 봉인지 확인합니다.
    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }
}

impl Timestamped for Kline {
    fn open_time(&self) -> i64 {
        self.times.open
    }
}

/// 백테스트 결과가 주석으로 붙은 캔들.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedKline {
    /// 시간 정보
    pub times: KlineTimes,
    /// 누적 수익률 (%)
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_profit: Decimal,
    /// 매매 신호 (매매 이벤트가 발생한 봉에만 존재)
    #[serde(
        default,
        deserialize_with = "present_signal",
        skip_serializing_if = "Option::is_none"
    )]
    pub signal: Option<SignalMarker>,
    /// 그 밖의 필드
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AnnotatedKline {
    /// 시작 시간과 누적 수익률로 캔들을 생성합니다.
    pub fn new(open_time: i64, percent_profit: Decimal) -> Self {
        Self {
            times: KlineTimes::open_at(open_time),
            percent_profit,
            signal: None,
            fields: Map::new(),
        }
    }

    /// 매매 신호를 설정합니다.
    pub fn with_signal(mut self, signal: impl Into<SignalMarker>) -> Self {
        self.signal = Some(signal.into());
        self
    }

    /// 매매 신호가 있는 봉인지 확인합니다.
    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }
}

impl Timestamped for AnnotatedKline {
    fn open_time(&self) -> i64 {
        self.times.open
    }
}

/// 시작 시간이 엄격하게 증가하는지 확인합니다.
///
/// 낙폭 계산은 이 순서를 전제로 하므로 호출자가 재정렬 없이 검증만 할 때 사용합니다.
pub fn is_chronological<T: Timestamped>(series: &[T]) -> bool {
    series
        .windows(2)
        .all(|pair| pair[0].open_time() < pair[1].open_time())
}
