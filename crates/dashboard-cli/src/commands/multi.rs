//! 멀티 시리즈 명령어.
//!
//! 거래량 상위 심볼 여러 개를 한 번에 조회합니다. 서버가 누적 수익률을 함께 보내면
//! 시리즈마다 통계도 출력합니다.

use anyhow::Result;
use dashboard_analytics::StatsRecord;
use dashboard_client::{BacktestBackend, BacktestOrchestrator};
use dashboard_core::{AnnotatedKline, DashboardConfig, Kline};
use std::path::Path;
use tracing::{debug, info};

use super::klines::KlineSummary;
use super::write_json;

/// 누적 수익률이 붙은 시리즈라면 백테스트 결과 캔들로 변환합니다.
///
/// 하나라도 `percentProfit`이 없으면 `None`을 반환합니다.
pub fn as_annotated(series: &[Kline]) -> Option<Vec<AnnotatedKline>> {
    series
        .iter()
        .map(|kline| {
            serde_json::to_value(kline)
                .and_then(serde_json::from_value::<AnnotatedKline>)
                .ok()
        })
        .collect()
}

/// 시리즈 하나의 출력 문자열.
pub fn describe_series(index: usize, series: &[Kline]) -> String {
    let mut text = format!("#{}\n{}", index + 1, KlineSummary::from_klines(series).summary());

    match as_annotated(series).filter(|annotated| !annotated.is_empty()) {
        Some(annotated) => {
            if let Ok(stats) = StatsRecord::from_series(&annotated) {
                text.push('\n');
                text.push_str(&stats.summary());
            }
        }
        None => debug!(index, "Series has no profit annotations"),
    }

    text
}

/// 멀티 시리즈 조회 실행
pub async fn run_multi_command<B: BacktestBackend>(
    orchestrator: &BacktestOrchestrator<B>,
    config: &DashboardConfig,
    output: Option<&Path>,
) -> Result<Vec<Vec<Kline>>> {
    let series = orchestrator.run_multi(config).await?;

    println!("\n📊 상위 {}개 시리즈", series.len());
    for (index, klines) in series.iter().enumerate() {
        println!("\n{}", describe_series(index, klines));
    }

    if let Some(path) = output {
        write_json(path, &series)?;
        info!("Series saved to: {}", path.display());
    }

    Ok(series)
}
