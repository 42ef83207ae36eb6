//! 백엔드 요청 페이로드.
//!
//! 요청 값은 생성 시점의 설정에서 복사되므로, 요청이 진행되는 동안 설정이 바뀌어도
//! 이미 만든 요청에는 영향이 없습니다.

use crate::query::build_url;
use dashboard_core::{
    AlgorithmSelection, BacktestMode, ConfigResult, DashboardConfig, Timeframe,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// 알고리즘 신호가 붙은 캔들 조회 요청 (`POST /klinesWithAlgorithm`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KlineRequest {
    /// 거래소
    pub exchange: String,
    /// 심볼
    pub symbol: String,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 조회 배수
    pub times: u32,
    /// 슬롯 순서대로 인코딩된 알고리즘 (1~2개)
    pub algorithms: Vec<AlgorithmSelection>,
}

impl KlineRequest {
    /// 설정에서 요청을 만듭니다.
    ///
    /// 알고리즘 인코딩에 실패하면 설정 에러를 반환합니다.
    pub fn from_config(config: &DashboardConfig) -> ConfigResult<Self> {
        Ok(Self {
            exchange: config.series.exchange.clone(),
            symbol: config.series.symbol.clone(),
            timeframe: config.series.timeframe,
            times: config.series.times,
            algorithms: config.algorithms.selections()?,
        })
    }
}

/// 상위 심볼 여러 개를 한 번에 조회하는 요청 (`POST /multi`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRequest {
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 조회 배수
    pub times: u32,
    /// 상위 몇 개 심볼을 조회할지
    pub rank: u32,
    /// 서버 측 자동 파라미터 탐색 여부
    pub auto_params: bool,
    /// 슬롯 순서대로 인코딩된 알고리즘
    pub algorithms: Vec<AlgorithmSelection>,
}

impl MultiRequest {
    /// 설정에서 요청을 만듭니다.
    pub fn from_config(config: &DashboardConfig) -> ConfigResult<Self> {
        Ok(Self {
            timeframe: config.series.timeframe,
            times: config.series.times,
            rank: config.multi.rank,
            auto_params: config.multi.auto_params,
            algorithms: config.algorithms.selections()?,
        })
    }
}

/// 백테스트 쿼리 (`POST /backtest?commission=..&<mode>=..`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestQuery {
    /// 거래당 수수료 (%)
    pub commission: Decimal,
    /// 수익 계산 방식
    pub mode: BacktestMode,
}

impl BacktestQuery {
    /// 새 쿼리를 생성합니다.
    pub fn new(commission: Decimal, mode: BacktestMode) -> Self {
        Self { commission, mode }
    }

    /// 설정의 수수료마다 하나씩, 설정 순서대로 쿼리를 만듭니다.
    pub fn from_config(config: &DashboardConfig) -> Vec<Self> {
        config
            .backtest
            .commissions
            .iter()
            .map(|commission| Self::new(*commission, config.backtest.mode.clone()))
            .collect()
    }

    /// 쿼리 파라미터 (수수료가 항상 먼저).
    ///
    /// 수수료는 뒤쪽 0을 제거해 표기합니다 (`0.10` → `0.1`).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("commission", self.commission.normalize().to_string()),
            (self.mode.query_key(), self.mode.query_value()),
        ]
    }

    /// 쿼리가 붙은 전체 URL.
    pub fn url(&self, endpoint: &str) -> String {
        build_url(endpoint, self.query_pairs())
    }
}

impl fmt::Display for BacktestQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commission={} {}", self.commission.normalize(), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::ConfigurationError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_kline_request_body_shape() {
        let mut config = DashboardConfig::default();
        config.algorithms.slots = vec!["rsi".to_string(), "deepTrend".to_string()];
        config.algorithms.params.rsi_length = vec![14, 7];

        let request = KlineRequest::from_config(&config).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "exchange": "binance",
                "symbol": "MATICUSDT",
                "timeframe": "1m",
                "times": 1,
                "algorithms": [
                    { "algorithm": "rsi", "length": 14 },
                    { "algorithm": "deepTrend" }
                ]
            })
        );
    }

    #[test]
    fn test_kline_request_rejects_unknown_algorithm() {
        let mut config = DashboardConfig::default();
        config.algorithms.slots = vec!["ichimoku".to_string()];

        let err = KlineRequest::from_config(&config).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownAlgorithm("ichimoku".to_string()));
    }

    #[test]
    fn test_multi_request_uses_camel_case() {
        let mut config = DashboardConfig::default();
        config.multi.rank = 5;
        config.multi.auto_params = true;

        let body = serde_json::to_value(MultiRequest::from_config(&config).unwrap()).unwrap();
        assert_eq!(body["rank"], json!(5));
        assert_eq!(body["autoParams"], json!(true));
        assert_eq!(body["timeframe"], json!("1m"));
        assert_eq!(body["algorithms"].as_array().unwrap().len(), 1);
        assert!(body.get("symbol").is_none());
    }

    #[test]
    fn test_backtest_query_commission_first() {
        let query = BacktestQuery::new(dec!(0.1), BacktestMode::FlowingProfit(true));
        assert_eq!(
            query.url("http://127.0.0.1:3000/backtest"),
            "http://127.0.0.1:3000/backtest?commission=0.1&flowingProfit=true"
        );

        let typed = BacktestQuery::new(dec!(0.10), BacktestMode::StrategyType("long".to_string()));
        assert_eq!(
            typed.url("http://h/backtest"),
            "http://h/backtest?commission=0.1&type=long"
        );

        let free = BacktestQuery::new(Decimal::ZERO, BacktestMode::default());
        assert_eq!(
            free.url("http://h/backtest"),
            "http://h/backtest?commission=0&flowingProfit=false"
        );
    }

    #[test]
    fn test_queries_follow_commission_order() {
        let mut config = DashboardConfig::default();
        config.backtest.commissions = vec![dec!(0.2), dec!(0), dec!(0.075)];

        let commissions: Vec<Decimal> = BacktestQuery::from_config(&config)
            .into_iter()
            .map(|q| q.commission)
            .collect();
        assert_eq!(commissions, vec![dec!(0.2), dec!(0), dec!(0.075)]);
    }
}
