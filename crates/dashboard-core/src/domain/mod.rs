//! 대시보드 도메인 모델.

mod algorithm;
mod backtest;
mod market_data;

pub use algorithm::*;
pub use backtest::*;
pub use market_data::*;
