//! 백테스트 리포트
//!
//! 하나의 백테스트 응답에서 차트 포인트와 통계를 함께 만듭니다.
//! 다음 응답이 오면 리포트는 통째로 교체됩니다.

use crate::charts::{project, PercentPoint};
use crate::error::StatsResult;
use crate::performance::StatsRecord;
use dashboard_core::{is_chronological, AnnotatedKline};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 백테스트 리포트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// 수익률 차트 포인트
    pub points: Vec<PercentPoint>,
    /// 통계
    pub stats: StatsRecord,
}

impl BacktestReport {
    /// 백테스트 결과 시리즈에서 리포트를 생성합니다.
    ///
    /// 시리즈가 시간순이 아니면 경고만 남기고 순서는 그대로 사용합니다.
    pub fn from_series(series: &[AnnotatedKline]) -> StatsResult<Self> {
        if !is_chronological(series) {
            warn!(points = series.len(), "Backtest series is not strictly ordered by open time");
        }

        let stats = StatsRecord::from_series(series)?;
        Ok(Self {
            points: project(series),
            stats,
        })
    }

    /// 첫 포인트와 마지막 포인트의 시간 (밀리초).
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_combines_points_and_stats() {
        let series = vec![
            AnnotatedKline::new(1_000, dec!(0)),
            AnnotatedKline::new(2_000, dec!(-1.5)).with_signal("BUY"),
            AnnotatedKline::new(3_000, dec!(2)),
        ];

        let report = BacktestReport::from_series(&series).unwrap();
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.points[1], PercentPoint::new(2_000, dec!(-1.5)));
        assert_eq!(report.stats.trades, 1);
        assert_eq!(report.stats.max_drawdown, dec!(1.5));
        assert_eq!(report.time_range(), Some((1_000, 3_000)));
    }

    #[test]
    fn test_report_empty_series() {
        assert_eq!(
            BacktestReport::from_series(&[]).unwrap_err(),
            StatsError::EmptySeries
        );
    }
}
