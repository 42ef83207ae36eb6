//! 통계/차트 변환 속성 테스트
//!
//! 임의의 누적 수익률 시리즈에 대해 통계 계산이 지켜야 할 성질을 검증합니다.

use dashboard_analytics::{max_drawdown, project, ProfitPerTrade, StatsRecord};
use dashboard_core::AnnotatedKline;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// (시간 간격, 수익률(센트 단위), 신호 여부) 목록으로 시간순 시리즈를 만듭니다.
fn build_series(steps: &[(u16, i32, bool)]) -> Vec<AnnotatedKline> {
    let mut open_time = 1_600_000_000_000i64;
    steps
        .iter()
        .map(|&(gap, cents, signal)| {
            open_time += i64::from(gap) + 1;
            let kline = AnnotatedKline::new(open_time, Decimal::new(i64::from(cents), 2));
            if signal {
                kline.with_signal("SELL")
            } else {
                kline
            }
        })
        .collect()
}

/// 모든 (고점, 이후 값) 쌍을 비교하는 기준 구현. 고점은 0에서 시작합니다.
fn brute_force_drawdown(values: &[Decimal]) -> Decimal {
    let mut worst = Decimal::ZERO;
    for j in 0..values.len() {
        let high = values[..j]
            .iter()
            .copied()
            .fold(Decimal::ZERO, Decimal::max);
        if values[j] < high {
            worst = worst.max(high - values[j]);
        }
    }
    worst
}

fn steps_strategy() -> impl Strategy<Value = Vec<(u16, i32, bool)>> {
    prop::collection::vec((any::<u16>(), -50_000i32..50_000, any::<bool>()), 1..200)
}

proptest! {
    #[test]
    fn profit_is_last_value(steps in steps_strategy()) {
        let series = build_series(&steps);
        let stats = StatsRecord::from_series(&series).unwrap();
        prop_assert_eq!(stats.profit, series.last().unwrap().percent_profit);
    }

    #[test]
    fn trades_count_signals(steps in steps_strategy()) {
        let series = build_series(&steps);
        let stats = StatsRecord::from_series(&series).unwrap();
        let expected = steps.iter().filter(|(_, _, signal)| *signal).count();
        prop_assert_eq!(stats.trades, expected);

        if expected == 0 {
            prop_assert_eq!(stats.profit_per_trade, ProfitPerTrade::NotApplicable);
        } else {
            prop_assert!(stats.profit_per_trade.value().is_some());
        }
    }

    #[test]
    fn drawdown_is_non_negative_and_matches_reference(steps in steps_strategy()) {
        let series = build_series(&steps);
        let values: Vec<Decimal> = series.iter().map(|k| k.percent_profit).collect();
        let stats = StatsRecord::from_series(&series).unwrap();

        prop_assert!(stats.max_drawdown >= Decimal::ZERO);
        prop_assert_eq!(stats.max_drawdown, brute_force_drawdown(&values));
        prop_assert_eq!(stats.max_drawdown, max_drawdown(values));
    }

    #[test]
    fn reduction_is_idempotent(steps in steps_strategy()) {
        let series = build_series(&steps);
        prop_assert_eq!(
            StatsRecord::from_series(&series),
            StatsRecord::from_series(&series)
        );
    }

    #[test]
    fn projection_is_one_to_one(steps in steps_strategy()) {
        let series = build_series(&steps);
        let points = project(&series);

        prop_assert_eq!(points.len(), series.len());
        for (point, kline) in points.iter().zip(&series) {
            prop_assert_eq!(point.x, kline.times.open);
            prop_assert_eq!(point.y, kline.percent_profit);
        }
    }
}
