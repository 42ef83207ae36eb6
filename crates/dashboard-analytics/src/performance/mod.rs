//! 성과 분석 모듈
//!
//! - [`stats`]: 백테스트 통계 계산 (거래 횟수, 수익률, 거래당 수익률, 최대 낙폭)

pub mod stats;

pub use stats::*;
