//! 백테스트 회계 방식 플래그.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 서버 측 수익 계산 방식.
///
/// 이 값은 해석하지 않고 쿼리 파라미터로 그대로 전달합니다.
/// - `FlowingProfit` → `flowingProfit=<bool>`
/// - `StrategyType` → `type=<전략 유형>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktestMode {
    /// 수익 재투자(flowing profit) 여부
    FlowingProfit(bool),
    /// 서버가 정의한 전략 유형 이름
    StrategyType(String),
}

impl BacktestMode {
    /// 쿼리 파라미터 키.
    pub fn query_key(&self) -> &'static str {
        match self {
            BacktestMode::FlowingProfit(_) => "flowingProfit",
            BacktestMode::StrategyType(_) => "type",
        }
    }

    /// 쿼리 파라미터 값.
    pub fn query_value(&self) -> String {
        match self {
            BacktestMode::FlowingProfit(enabled) => enabled.to_string(),
            BacktestMode::StrategyType(name) => name.clone(),
        }
    }
}

impl Default for BacktestMode {
    fn default() -> Self {
        BacktestMode::FlowingProfit(false)
    }
}

impl fmt::Display for BacktestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.query_key(), self.query_value())
    }
}
