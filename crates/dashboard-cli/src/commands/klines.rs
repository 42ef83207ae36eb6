//! 캔들 조회 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # EMA 신호가 붙은 MATICUSDT 1분봉 조회
//! dashboard klines
//!
//! # 두 개의 알고리즘으로 BTCUSDT 4시간봉 조회 후 저장
//! dashboard --symbol BTCUSDT --timeframe 4h --algorithm ema --algorithm rsi klines -o data/btc.json
//! ```

use anyhow::Result;
use dashboard_client::{BacktestBackend, BacktestOrchestrator};
use dashboard_core::{is_chronological, DashboardConfig, Kline, Timestamped};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use super::{format_millis, write_json};

/// 캔들 시리즈 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KlineSummary {
    /// 캔들 수
    pub count: usize,
    /// 신호가 있는 캔들 수
    pub signals: usize,
    /// 첫 캔들 시작 시간 (밀리초)
    pub first_open: Option<i64>,
    /// 마지막 캔들 시작 시간 (밀리초)
    pub last_open: Option<i64>,
}

impl KlineSummary {
    /// 캔들 시리즈에서 요약을 만듭니다.
    pub fn from_klines(klines: &[Kline]) -> Self {
        Self {
            count: klines.len(),
            signals: klines.iter().filter(|k| k.has_signal()).count(),
            first_open: klines.first().map(|k| k.open_time()),
            last_open: klines.last().map(|k| k.open_time()),
        }
    }

    /// 여러 줄 텍스트 요약.
    pub fn summary(&self) -> String {
        let mut text = format!("캔들 수: {}\n신호 수: {}", self.count, self.signals);
        if let (Some(first), Some(last)) = (self.first_open, self.last_open) {
            text.push_str(&format!(
                "\n기간: {} ~ {}",
                format_millis(first),
                format_millis(last)
            ));
        }
        text
    }
}

/// 캔들 조회 실행
pub async fn run_klines<B: BacktestBackend>(
    orchestrator: &BacktestOrchestrator<B>,
    config: &DashboardConfig,
    output: Option<&Path>,
) -> Result<Vec<Kline>> {
    let klines = orchestrator.load_klines(config).await?;

    if !is_chronological(&klines) {
        warn!("Klines are not strictly ordered by open time");
    }

    let summary = KlineSummary::from_klines(&klines);
    println!("\n{}", summary.summary());

    if let Some(path) = output {
        write_json(path, &klines)?;
        info!("Klines saved to: {}", path.display());
    }

    Ok(klines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_signals() {
        let klines = vec![
            Kline::new(60_000),
            Kline::new(120_000).with_signal("BUY"),
            Kline::new(180_000).with_signal("SELL"),
        ];

        let summary = KlineSummary::from_klines(&klines);
        assert_eq!(
            summary,
            KlineSummary {
                count: 3,
                signals: 2,
                first_open: Some(60_000),
                last_open: Some(180_000),
            }
        );
        assert!(summary.summary().contains("기간: 1970-01-01 00:01 ~ 1970-01-01 00:03"));
    }

    #[test]
    fn test_summary_empty() {
        let summary = KlineSummary::from_klines(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.first_open, None);
        assert!(!summary.summary().contains("기간"));
    }
}
