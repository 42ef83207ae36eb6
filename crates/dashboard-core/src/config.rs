//! 설정 관리.
//!
//! 대시보드의 모든 설정은 요청 시점에 [`DashboardConfig`] 값으로 캡처되어
//! 요청 구조체에 복사됩니다. 동시에 실행되는 요청 사이에 공유되는 가변 상태는 없습니다.
//!
//! 로드 순서: 기본값 → TOML 파일 → `DASHBOARD__<섹션>__<키>` 환경 변수.

use crate::domain::{encode_slots, AlgorithmParams, AlgorithmSelection, BacktestMode, MAX_SLOTS};
use crate::error::{ConfigResult, ConfigurationError};
use crate::types::Timeframe;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 대시보드 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 백엔드 서버 설정
    pub server: ServerConfig,
    /// 조회할 캔들 시리즈
    pub series: SeriesConfig,
    /// 백테스트 설정
    pub backtest: BacktestConfig,
    /// 알고리즘 슬롯 설정
    pub algorithms: AlgorithmConfig,
    /// 멀티 시리즈 설정
    pub multi: MultiConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 백엔드 서버 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 백엔드 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초). 지정하지 않으면 타임아웃 없음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: None,
        }
    }
}

/// 캔들 시리즈 식별자.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// 거래소
    pub exchange: String,
    /// 심볼
    pub symbol: String,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 조회 배수 (1 = 1000개 캔들)
    pub times: u32,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            exchange: "binance".to_string(),
            symbol: "MATICUSDT".to_string(),
            timeframe: Timeframe::M1,
            times: 1,
        }
    }
}

/// 백테스트 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// 수수료 목록 (%). 수수료마다 하나의 백테스트가 실행됩니다
    pub commissions: Vec<Decimal>,
    /// 수익 계산 방식
    pub mode: BacktestMode,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            commissions: vec![Decimal::ZERO, Decimal::new(1, 1)],
            mode: BacktestMode::default(),
        }
    }
}

/// 알고리즘 슬롯 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// 슬롯별 알고리즘 태그 (주 알고리즘이 먼저)
    pub slots: Vec<String>,
    /// 슬롯별 파라미터
    pub params: AlgorithmParams,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            slots: vec!["ema".to_string()],
            params: AlgorithmParams::default(),
        }
    }
}

impl AlgorithmConfig {
    /// 모든 슬롯을 슬롯 순서대로 인코딩합니다.
    pub fn selections(&self) -> ConfigResult<Vec<AlgorithmSelection>> {
        encode_slots(&self.slots, &self.params)
    }
}

/// 멀티 시리즈 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultiConfig {
    /// 상위 몇 개 심볼을 조회할지
    pub rank: u32,
    /// 서버 측 자동 파라미터 탐색 여부
    pub auto_params: bool,
}

impl Default for MultiConfig {
    fn default() -> Self {
        Self {
            rank: 10,
            auto_params: false,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 출력 여부
    pub span_events: bool,
    /// 파일명과 줄 번호 출력 여부
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
            source_location: false,
        }
    }
}

impl DashboardConfig {
    /// 설정 파일(선택)과 환경 변수를 읽습니다.
    ///
    /// 검증하지 않습니다. 읽은 뒤 값을 덮어쓰는 호출자는 덮어쓰기를 마친 다음
    /// [`validate`](Self::validate)를 호출해야 합니다.
    pub fn read(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("backtest.commissions")
                    .with_list_parse_key("algorithms.slots")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 설정 값을 검증합니다.
    ///
    /// 알고리즘 슬롯은 여기서 실제로 인코딩해 보므로, 검증을 통과한 설정은
    /// 요청 단계에서 설정 에러를 내지 않습니다.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigurationError::Invalid(
                "server.base_url이 비어 있습니다".to_string(),
            ));
        }

        if self.series.symbol.trim().is_empty() {
            return Err(ConfigurationError::Invalid(
                "series.symbol이 비어 있습니다".to_string(),
            ));
        }

        if self.backtest.commissions.is_empty() {
            return Err(ConfigurationError::Invalid(
                "backtest.commissions에 최소 하나의 값이 필요합니다".to_string(),
            ));
        }

        if let Some(negative) = self
            .backtest
            .commissions
            .iter()
            .find(|c| c.is_sign_negative() && !c.is_zero())
        {
            return Err(ConfigurationError::Invalid(format!(
                "수수료는 음수일 수 없습니다: {}",
                negative
            )));
        }

        if self.algorithms.slots.len() > MAX_SLOTS {
            return Err(ConfigurationError::InvalidSlotCount(
                self.algorithms.slots.len(),
            ));
        }

        self.algorithms.selections().map(|_| ())
    }
}
