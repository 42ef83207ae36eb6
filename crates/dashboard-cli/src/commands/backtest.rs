//! 백테스트 명령어.
//!
//! 캔들을 한 번 조회한 뒤, 수수료마다 하나씩 백테스트를 동시에 실행합니다.
//! 결과는 완료되는 순서대로 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 설정 파일의 수수료 목록으로 백테스트
//! dashboard backtest
//!
//! # 수수료 0%, 0.1% 두 가지로 백테스트 후 JSON 저장
//! dashboard backtest --commission 0 --commission 0.1 -o reports/ema.json
//! ```

use anyhow::{anyhow, Result};
use dashboard_analytics::BacktestReport;
use dashboard_client::{BacktestBackend, BacktestOrchestrator, BacktestQuery};
use dashboard_core::{backtest_span, DashboardConfig, Kline};
use futures::stream::{FuturesUnordered, StreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn, Instrument};

use super::{format_millis, write_json};

/// 수수료 하나에 대한 백테스트 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionReport {
    /// 수수료 (%)
    #[serde(with = "rust_decimal::serde::float")]
    pub commission: Decimal,
    /// 수익 계산 방식 (`flowingProfit=false` 형식)
    pub mode: String,
    /// 차트 포인트와 통계
    #[serde(flatten)]
    pub report: BacktestReport,
}

impl CommissionReport {
    /// 텍스트 요약.
    pub fn summary(&self) -> String {
        let mut text = format!("[수수료 {}% / {}]\n", self.commission.normalize(), self.mode);
        if let Some((first, last)) = self.report.time_range() {
            text.push_str(&format!(
                "기간: {} ~ {}\n",
                format_millis(first),
                format_millis(last)
            ));
        }
        text.push_str(&self.report.stats.summary());
        text
    }
}

/// 캔들 시리즈를 수수료별로 동시에 백테스트합니다.
///
/// 각 결과는 완료되는 즉시 출력되며, 반환 목록도 완료 순서를 따릅니다.
/// 일부 백테스트가 실패해도 나머지는 계속 진행하고, 하나라도 실패하면 마지막에 에러를 반환합니다.
pub async fn run_backtests<B: BacktestBackend>(
    orchestrator: &BacktestOrchestrator<B>,
    symbol: &str,
    klines: &[Kline],
    queries: &[BacktestQuery],
) -> Result<Vec<CommissionReport>> {
    let mut pending: FuturesUnordered<_> = queries
        .iter()
        .map(|query| {
            let span = backtest_span!("backtest", symbol, query.commission);
            async move { (query, orchestrator.run_backtest(klines, query).await) }.instrument(span)
        })
        .collect();

    let mut reports = Vec::with_capacity(queries.len());
    let mut failures = 0usize;

    while let Some((query, result)) = pending.next().await {
        let series = match result {
            Ok(series) => series,
            Err(e) => {
                error!(commission = %query.commission, "Backtest failed: {}", e);
                failures += 1;
                continue;
            }
        };

        match BacktestReport::from_series(&series) {
            Ok(report) => {
                let report = CommissionReport {
                    commission: query.commission,
                    mode: query.mode.to_string(),
                    report,
                };
                println!("\n{}", report.summary());
                reports.push(report);
            }
            Err(e) => {
                warn!(commission = %query.commission, "No backtest statistics: {}", e);
                println!("\n[수수료 {}%] 결과 없음", query.commission.normalize());
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{}개 중 {}개의 백테스트가 실패했습니다",
            queries.len(),
            failures
        ));
    }

    Ok(reports)
}

/// 백테스트 실행: 캔들 조회 → 수수료별 백테스트 → (옵션) 저장
pub async fn run_backtest_command<B: BacktestBackend>(
    orchestrator: &BacktestOrchestrator<B>,
    config: &DashboardConfig,
    output: Option<&Path>,
) -> Result<Vec<CommissionReport>> {
    let klines = orchestrator.load_klines(config).await?;
    if klines.is_empty() {
        return Err(anyhow!("{} 캔들 데이터가 없습니다", config.series.symbol));
    }

    let queries = BacktestQuery::from_config(config);
    info!(
        klines = klines.len(),
        backtests = queries.len(),
        "Starting backtests"
    );

    let reports = run_backtests(orchestrator, &config.series.symbol, &klines, &queries).await?;

    if let Some(path) = output {
        save_reports(&reports, path)?;
        info!("Report saved to: {}", path.display());
    }

    Ok(reports)
}

/// 백테스트 리포트를 파일로 저장
///
/// `.json` 확장자면 차트 포인트를 포함한 JSON, 그 외에는 텍스트 요약을 저장합니다.
pub fn save_reports(reports: &[CommissionReport], path: &Path) -> Result<()> {
    if path.extension().map_or(false, |ext| ext == "json") {
        return write_json(path, reports);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = reports
        .iter()
        .map(CommissionReport::summary)
        .collect::<Vec<_>>()
        .join("\n\n");
    std::fs::write(path, content)?;
    Ok(())
}

// ==================== 테스트 ====================
