//! 트레이딩 알고리즘 선택과 요청 페이로드 인코딩.
//!
//! 하나의 요청은 최대 두 개의 알고리즘 슬롯(주 알고리즘 + 보조 알고리즘)을 가지며,
//! 각 슬롯은 독립적인 파라미터를 사용합니다. 슬롯별 파라미터는
//! [`AlgorithmParams`]에 슬롯 인덱스 순서로 저장됩니다.
//!
//! 인코딩 결과인 [`AlgorithmSelection`]은 그대로 직렬화되어
//! `{ "algorithm": <태그>, ...변형별 필드 }` 형태의 JSON이 됩니다.

use crate::error::{ConfigResult, ConfigurationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 요청 하나에 설정할 수 있는 최대 알고리즘 슬롯 수.
pub const MAX_SLOTS: usize = 2;

/// 알고리즘 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Momentum,
    Macd,
    Rsi,
    Ema,
    Bb,
    DeepTrend,
    Dca,
    MeanReversion,
    TwitterSentiment,
    TrendLine,
}

impl AlgorithmKind {
    /// 지원하는 모든 알고리즘.
    pub const ALL: [AlgorithmKind; 10] = [
        AlgorithmKind::Momentum,
        AlgorithmKind::Macd,
        AlgorithmKind::Rsi,
        AlgorithmKind::Ema,
        AlgorithmKind::Bb,
        AlgorithmKind::DeepTrend,
        AlgorithmKind::Dca,
        AlgorithmKind::MeanReversion,
        AlgorithmKind::TwitterSentiment,
        AlgorithmKind::TrendLine,
    ];

    /// 백엔드가 사용하는 태그 문자열.
    pub fn tag(&self) -> &'static str {
        match self {
            AlgorithmKind::Momentum => "momentum",
            AlgorithmKind::Macd => "macd",
            AlgorithmKind::Rsi => "rsi",
            AlgorithmKind::Ema => "ema",
            AlgorithmKind::Bb => "bb",
            AlgorithmKind::DeepTrend => "deepTrend",
            AlgorithmKind::Dca => "dca",
            AlgorithmKind::MeanReversion => "meanReversion",
            AlgorithmKind::TwitterSentiment => "twitterSentiment",
            AlgorithmKind::TrendLine => "trendLine",
        }
    }

    /// 이 알고리즘이 요구하는 파라미터 이름 (와이어 형식 기준).
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            AlgorithmKind::Momentum => &["streak"],
            AlgorithmKind::Macd => &["fast", "slow", "signal"],
            AlgorithmKind::Rsi => &["length"],
            AlgorithmKind::Ema => &["periodOpen", "periodClose"],
            AlgorithmKind::Bb => &["period"],
            AlgorithmKind::MeanReversion => &["threshold", "profitBasedTrailingStopLoss"],
            AlgorithmKind::DeepTrend
            | AlgorithmKind::Dca
            | AlgorithmKind::TwitterSentiment
            | AlgorithmKind::TrendLine => &[],
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigurationError;

    /// 태그 문자열을 파싱합니다.
    ///
    /// 대소문자와 `_`, `-` 구분자는 무시합니다 (`mean_reversion`, `MeanReversion` 모두 허용).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().to_lowercase() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownAlgorithm(s.to_string()))
    }
}

/// 슬롯 하나에 대해 인코딩된 알고리즘 설정.
///
/// 변형마다 필요한 필드만 가지므로, 다른 알고리즘의 필드가 `null`로 채워지는 일이 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "camelCase")]
pub enum AlgorithmSelection {
    Momentum {
        streak: u32,
    },
    Macd {
        fast: u32,
        slow: u32,
        signal: u32,
    },
    Rsi {
        length: u32,
    },
    #[serde(rename_all = "camelCase")]
    Ema {
        period_open: u32,
        period_close: u32,
    },
    Bb {
        period: u32,
    },
    DeepTrend,
    Dca,
    #[serde(rename_all = "camelCase")]
    MeanReversion {
        #[serde(with = "rust_decimal::serde::float")]
        threshold: Decimal,
        profit_based_trailing_stop_loss: bool,
    },
    TwitterSentiment,
    TrendLine,
}

impl AlgorithmSelection {
    /// 이 설정의 알고리즘 태그를 반환합니다.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmSelection::Momentum { .. } => AlgorithmKind::Momentum,
            AlgorithmSelection::Macd { .. } => AlgorithmKind::Macd,
            AlgorithmSelection::Rsi { .. } => AlgorithmKind::Rsi,
            AlgorithmSelection::Ema { .. } => AlgorithmKind::Ema,
            AlgorithmSelection::Bb { .. } => AlgorithmKind::Bb,
            AlgorithmSelection::DeepTrend => AlgorithmKind::DeepTrend,
            AlgorithmSelection::Dca => AlgorithmKind::Dca,
            AlgorithmSelection::MeanReversion { .. } => AlgorithmKind::MeanReversion,
            AlgorithmSelection::TwitterSentiment => AlgorithmKind::TwitterSentiment,
            AlgorithmSelection::TrendLine => AlgorithmKind::TrendLine,
        }
    }
}

/// 슬롯별 알고리즘 파라미터 저장소.
///
/// 각 필드는 슬롯 인덱스로 접근하는 목록입니다 (`rsi_length[1]`은 보조 슬롯의 RSI 길이).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmParams {
    /// 모멘텀 연속 봉 수
    pub momentum_streak: Vec<u32>,
    /// MACD 단기 EMA 기간
    pub macd_fast: Vec<u32>,
    /// MACD 장기 EMA 기간
    pub macd_slow: Vec<u32>,
    /// MACD 시그널 기간
    pub macd_signal: Vec<u32>,
    /// RSI 길이
    pub rsi_length: Vec<u32>,
    /// 진입 EMA 기간
    pub ema_period_open: Vec<u32>,
    /// 청산 EMA 기간
    pub ema_period_close: Vec<u32>,
    /// 볼린저 밴드 기간
    pub bb_period: Vec<u32>,
    /// 평균회귀 진입 임계값
    pub mean_reversion_threshold: Vec<Decimal>,
    /// 수익 기반 트레일링 스탑 사용 여부
    pub mean_reversion_profit_based_trailing_stop_loss: Vec<bool>,
}

impl Default for AlgorithmParams {
    fn default() -> Self {
        Self {
            momentum_streak: vec![3; MAX_SLOTS],
            macd_fast: vec![12; MAX_SLOTS],
            macd_slow: vec![26; MAX_SLOTS],
            macd_signal: vec![9; MAX_SLOTS],
            rsi_length: vec![7; MAX_SLOTS],
            ema_period_open: vec![200; MAX_SLOTS],
            ema_period_close: vec![200; MAX_SLOTS],
            bb_period: vec![20; MAX_SLOTS],
            mean_reversion_threshold: vec![Decimal::new(5, 0); MAX_SLOTS],
            mean_reversion_profit_based_trailing_stop_loss: vec![false; MAX_SLOTS],
        }
    }
}

fn slot_value<T: Copy>(
    values: &[T],
    slot: usize,
    algorithm: AlgorithmKind,
    field: &'static str,
) -> ConfigResult<T> {
    values
        .get(slot)
        .copied()
        .ok_or(ConfigurationError::MissingParameter {
            algorithm,
            field,
            slot,
        })
}

/// 알고리즘 태그와 슬롯 파라미터로 요청 페이로드를 만듭니다.
///
/// 파라미터가 없는 알고리즘(`DeepTrend`, `Dca`, `TwitterSentiment`, `TrendLine`)은
/// 태그만 가진 설정이 됩니다. 슬롯 인덱스가 범위를 벗어나거나 해당 슬롯의 파라미터가
/// 비어 있으면 [`ConfigurationError`]를 반환합니다.
pub fn encode(
    kind: AlgorithmKind,
    slot: usize,
    params: &AlgorithmParams,
) -> ConfigResult<AlgorithmSelection> {
    if slot >= MAX_SLOTS {
        return Err(ConfigurationError::SlotOutOfRange {
            slot,
            max: MAX_SLOTS,
        });
    }

    let selection = match kind {
        AlgorithmKind::Momentum => AlgorithmSelection::Momentum {
            streak: slot_value(&params.momentum_streak, slot, kind, "streak")?,
        },
        AlgorithmKind::Macd => AlgorithmSelection::Macd {
            fast: slot_value(&params.macd_fast, slot, kind, "fast")?,
            slow: slot_value(&params.macd_slow, slot, kind, "slow")?,
            signal: slot_value(&params.macd_signal, slot, kind, "signal")?,
        },
        AlgorithmKind::Rsi => AlgorithmSelection::Rsi {
            length: slot_value(&params.rsi_length, slot, kind, "length")?,
        },
        AlgorithmKind::Ema => AlgorithmSelection::Ema {
            period_open: slot_value(&params.ema_period_open, slot, kind, "periodOpen")?,
            period_close: slot_value(&params.ema_period_close, slot, kind, "periodClose")?,
        },
        AlgorithmKind::Bb => AlgorithmSelection::Bb {
            period: slot_value(&params.bb_period, slot, kind, "period")?,
        },
        AlgorithmKind::DeepTrend => AlgorithmSelection::DeepTrend,
        AlgorithmKind::Dca => AlgorithmSelection::Dca,
        AlgorithmKind::MeanReversion => AlgorithmSelection::MeanReversion {
            threshold: slot_value(&params.mean_reversion_threshold, slot, kind, "threshold")?,
            profit_based_trailing_stop_loss: slot_value(
                &params.mean_reversion_profit_based_trailing_stop_loss,
                slot,
                kind,
                "profitBasedTrailingStopLoss",
            )?,
        },
        AlgorithmKind::TwitterSentiment => AlgorithmSelection::TwitterSentiment,
        AlgorithmKind::TrendLine => AlgorithmSelection::TrendLine,
    };

    Ok(selection)
}

/// 태그 문자열을 파싱한 뒤 인코딩합니다.
pub fn encode_tag(tag: &str, slot: usize, params: &AlgorithmParams) -> ConfigResult<AlgorithmSelection> {
    encode(tag.parse()?, slot, params)
}

/// 슬롯 순서대로 모든 알고리즘을 인코딩합니다 (주 알고리즘이 먼저).
///
/// 슬롯 수는 1개 이상 [`MAX_SLOTS`]개 이하여야 합니다.
pub fn encode_slots<S: AsRef<str>>(
    tags: &[S],
    params: &AlgorithmParams,
) -> ConfigResult<Vec<AlgorithmSelection>> {
    if tags.is_empty() || tags.len() > MAX_SLOTS {
        return Err(ConfigurationError::InvalidSlotCount(tags.len()));
    }

    tags.iter()
        .enumerate()
        .map(|(slot, tag)| encode_tag(tag.as_ref(), slot, params))
        .collect()
}
