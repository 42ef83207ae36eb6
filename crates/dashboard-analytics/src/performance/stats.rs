//! 백테스트 통계 계산 모듈
//!
//! 백엔드가 계산한 누적 수익률 시리즈에서 다음 지표를 한 번의 순회로 구합니다:
//! - 거래 횟수: 신호가 있는 봉의 수
//! - 수익률: 마지막 봉의 누적 수익률
//! - 거래당 수익률: 수익률 / 거래 횟수 (거래가 없으면 "해당 없음")
//! - 최대 낙폭 (Maximum Drawdown): 지금까지의 고점 대비 최대 하락폭 (%p)
//!
//! # 사용 예시
//!
//! ```rust
//! use dashboard_analytics::performance::StatsRecord;
//! use dashboard_core::AnnotatedKline;
//! use rust_decimal_macros::dec;
//!
//! let series = vec![
//!     AnnotatedKline::new(0, dec!(0)),
//!     AnnotatedKline::new(1, dec!(10)).with_signal("BUY"),
//!     AnnotatedKline::new(2, dec!(5)),
//!     AnnotatedKline::new(3, dec!(15)).with_signal("SELL"),
//! ];
//!
//! let stats = StatsRecord::from_series(&series).unwrap();
//! assert_eq!(stats.profit, dec!(15));
//! assert_eq!(stats.max_drawdown, dec!(5));
//! ```

use crate::error::{StatsError, StatsResult};
use dashboard_core::{AnnotatedKline, DecimalExt};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// 표시용 문자열 "해당 없음".
pub const NOT_APPLICABLE: &str = "N/A";

/// 거래당 수익률.
///
/// 거래가 한 번도 없으면 나눗셈이 정의되지 않으므로 숫자 대신 `NotApplicable`이 됩니다.
/// JSON에서는 숫자 또는 `null`로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitPerTrade {
    /// 거래당 수익률 (%)
    Value(Decimal),
    /// 거래가 없어 계산할 수 없음
    NotApplicable,
}

impl ProfitPerTrade {
    /// 수익률과 거래 횟수로 계산합니다.
    pub fn compute(profit: Decimal, trades: usize) -> Self {
        if trades == 0 {
            return ProfitPerTrade::NotApplicable;
        }

        profit
            .checked_div(Decimal::from(trades))
            .map_or(ProfitPerTrade::NotApplicable, ProfitPerTrade::Value)
    }

    /// 값이 있으면 반환합니다.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            ProfitPerTrade::Value(value) => Some(*value),
            ProfitPerTrade::NotApplicable => None,
        }
    }

    /// 계산 불가 여부.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, ProfitPerTrade::NotApplicable)
    }
}

impl fmt::Display for ProfitPerTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitPerTrade::Value(value) => f.write_str(&value.to_percent_string(3)),
            ProfitPerTrade::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for ProfitPerTrade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProfitPerTrade::Value(value) => rust_decimal::serde::float::serialize(value, serializer),
            ProfitPerTrade::NotApplicable => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ProfitPerTrade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float_option::deserialize(deserializer)?;
        Ok(value.map_or(ProfitPerTrade::NotApplicable, ProfitPerTrade::Value))
    }
}

/// 백테스트 통계
///
/// 응답마다 전체 시리즈에서 새로 계산되며, 이전 결과와 병합하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    /// 거래 횟수 (신호가 있는 봉의 수)
    pub trades: usize,

    /// 최종 누적 수익률 (%)
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,

    /// 거래당 수익률 (%)
    pub profit_per_trade: ProfitPerTrade,

    /// 최대 낙폭 (%p, 0 이상)
    #[serde(with = "rust_decimal::serde::float")]
    pub max_drawdown: Decimal,
}

impl StatsRecord {
    /// 백테스트 결과 시리즈에서 통계를 계산합니다.
    ///
    /// 시리즈는 시작 시간 순으로 정렬되어 있어야 하며, 비어 있으면
    /// [`StatsError::EmptySeries`]를 반환합니다.
    pub fn from_series(series: &[AnnotatedKline]) -> StatsResult<Self> {
        let mut trades = 0usize;
        let mut last = None;
        let mut drawdown = DrawdownTracker::new();

        for kline in series {
            if kline.has_signal() {
                trades += 1;
            }
            drawdown.update(kline.percent_profit);
            last = Some(kline.percent_profit);
        }

        let profit = last.ok_or(StatsError::EmptySeries)?;
        let profit_per_trade = ProfitPerTrade::compute(profit, trades);

        if profit_per_trade.is_not_applicable() {
            warn!(points = series.len(), "No trades in series, profit per trade not applicable");
        }

        Ok(Self {
            trades,
            profit,
            profit_per_trade,
            max_drawdown: drawdown.max_drawdown(),
        })
    }

    /// 대시보드 표시용 문자열로 변환합니다.
    pub fn display(&self) -> StatsDisplay {
        StatsDisplay {
            trades: self.trades.to_string(),
            profit: self.profit.to_percent_string(2),
            profit_per_trade: self.profit_per_trade.to_string(),
            max_drawdown: self.max_drawdown.to_percent_string(2),
        }
    }

    /// 여러 줄 텍스트 요약을 생성합니다.
    pub fn summary(&self) -> String {
        let display = self.display();
        format!(
            "백테스트 통계\n\
             ═══════════════════════════════\n\
             거래 횟수: {}\n\
             수익률: {}\n\
             거래당 수익률: {}\n\
             최대 낙폭: {}\n\
             ═══════════════════════════════",
            display.trades, display.profit, display.profit_per_trade, display.max_drawdown
        )
    }
}

/// 화면 표시용 통계 문자열
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsDisplay {
    pub trades: String,
    pub profit: String,
    pub profit_per_trade: String,
    pub max_drawdown: String,
}

/// 고점 대비 낙폭 추적기
///
/// 고점은 0에서 시작합니다. 따라서 첫 값이 음수이면 그 자체가 낙폭이 됩니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawdownTracker {
    high: Decimal,
    max_drawdown: Decimal,
}

impl DrawdownTracker {
    /// 고점 0, 최대 낙폭 0으로 시작하는 추적기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 누적 수익률을 반영합니다.
    ///
    /// 낙폭이 `Decimal` 범위를 넘으면 `Decimal::MAX`로 포화됩니다.
    pub fn update(&mut self, value: Decimal) {
        if value < self.high {
            let drawdown = self.high.checked_sub(value).unwrap_or(Decimal::MAX);
            if drawdown > self.max_drawdown {
                self.max_drawdown = drawdown;
            }
        } else {
            self.high = value;
        }
    }

    /// 지금까지의 최대 낙폭.
    pub fn max_drawdown(&self) -> Decimal {
        self.max_drawdown
    }
}

/// 누적 수익률 시리즈의 최대 낙폭을 계산합니다.
///
/// # 예시
///
/// 0 → 10(고점) → 5(저점) → 15: 최대 낙폭 = 10 - 5 = 5
pub fn max_drawdown<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut tracker = DrawdownTracker::new();
    for value in values {
        tracker.update(value);
    }
    tracker.max_drawdown()
}
