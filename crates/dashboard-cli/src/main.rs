//! 캔들 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # EMA 신호가 붙은 캔들 조회
//! dashboard klines
//!
//! # BTCUSDT 1시간봉, MACD + RSI 슬롯으로 수수료별 백테스트
//! dashboard --symbol BTCUSDT --timeframe 1h --algorithm macd --algorithm rsi backtest
//!
//! # 거래량 상위 심볼 조회
//! dashboard multi
//!
//! # 지원 알고리즘 목록 보기
//! dashboard algorithms
//! ```

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use dashboard_cli::commands::{algorithms, backtest, klines, multi};
use dashboard_cli::{load_config, CliOverrides};
use dashboard_client::{BacktestOrchestrator, HttpBackend};
use dashboard_core::{init_logging, LogConfig, Timeframe};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Kline dashboard CLI - 알고리즘 신호 캔들 조회 및 백테스트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml, 없으면 환경 변수만 사용)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// 백엔드 기본 URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 심볼 (예: MATICUSDT)
    #[arg(short, long, global = true)]
    symbol: Option<String>,

    /// 타임프레임 (1m, 5m, 1h, 4h, 1d ...)
    #[arg(short, long, global = true)]
    timeframe: Option<Timeframe>,

    /// 알고리즘 태그 (최대 2번, 첫 번째가 주 알고리즘)
    #[arg(short, long = "algorithm", global = true)]
    algorithms: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 알고리즘 신호가 붙은 캔들 조회
    Klines {
        /// 결과 저장 경로 (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 수수료별 백테스트 실행
    Backtest {
        /// 수수료 (%, 여러 번 지정 가능)
        #[arg(long = "commission")]
        commissions: Vec<Decimal>,

        /// 결과 저장 경로 (.json이면 차트 포인트 포함)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 거래량 상위 심볼 여러 개 조회
    Multi {
        /// 상위 몇 개 심볼을 조회할지
        #[arg(long)]
        rank: Option<u32>,

        /// 서버 측 자동 파라미터 탐색
        #[arg(long)]
        auto_params: bool,

        /// 결과 저장 경로 (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 사용 가능한 알고리즘 목록 보기
    Algorithms,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let commissions = match &self.command {
            Commands::Backtest { commissions, .. } => commissions.clone(),
            _ => Vec::new(),
        };

        CliOverrides {
            base_url: self.base_url.clone(),
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            algorithms: self.algorithms.clone(),
            commissions,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Algorithms = cli.command {
        algorithms::print_available_algorithms();
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref(), &cli.overrides())?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let backend = HttpBackend::from_config(&config.server)?;
    let orchestrator = BacktestOrchestrator::new(backend);

    info!(
        base_url = %config.server.base_url,
        symbol = %config.series.symbol,
        "Dashboard CLI started"
    );

    match cli.command {
        Commands::Klines { output } => {
            if let Err(e) = klines::run_klines(&orchestrator, &config, output.as_deref()).await {
                error!("Kline request failed: {}", e);
                return Err(e);
            }
        }

        Commands::Backtest { output, .. } => {
            println!("\n📊 백테스트 실행 중...");
            println!("종목: {}", config.series.symbol);
            println!("타임프레임: {}", config.series.timeframe);
            println!("알고리즘: {}", config.algorithms.slots.join(", "));

            match backtest::run_backtest_command(&orchestrator, &config, output.as_deref()).await {
                Ok(reports) => {
                    info!("✅ {} backtests completed", reports.len());
                    if let Some(out) = output {
                        println!("\n📁 결과 저장됨: {}", out.display());
                    }
                }
                Err(e) => {
                    error!("Backtest failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Multi {
            rank,
            auto_params,
            output,
        } => {
            if let Some(rank) = rank {
                config.multi.rank = rank;
            }
            if auto_params {
                config.multi.auto_params = true;
            }

            if let Err(e) = multi::run_multi_command(&orchestrator, &config, output.as_deref()).await
            {
                error!("Multi-series request failed: {}", e);
                return Err(e);
            }
        }

        // 설정 로드 전에 처리됨
        Commands::Algorithms => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_backtest_overrides() {
        let cli = Cli::parse_from([
            "dashboard",
            "--symbol",
            "BTCUSDT",
            "--timeframe",
            "4h",
            "-a",
            "ema",
            "-a",
            "rsi",
            "backtest",
            "--commission",
            "0",
            "--commission",
            "0.1",
        ]);

        let overrides = cli.overrides();
        assert_eq!(overrides.symbol.as_deref(), Some("BTCUSDT"));
        assert_eq!(overrides.timeframe, Some(Timeframe::H4));
        assert_eq!(overrides.algorithms, vec!["ema", "rsi"]);
        assert_eq!(overrides.commissions, vec![dec!(0), dec!(0.1)]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["dashboard", "klines", "--base-url", "http://h:1"]);
        assert_eq!(cli.overrides().base_url.as_deref(), Some("http://h:1"));
        assert!(cli.overrides().commissions.is_empty());
    }

    #[test]
    fn test_invalid_timeframe_rejected() {
        assert!(Cli::try_parse_from(["dashboard", "--timeframe", "7m", "klines"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
