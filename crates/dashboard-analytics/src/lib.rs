//! 백테스트 결과 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 백테스트 통계 계산 (거래 횟수, 수익률, 거래당 수익률, 최대 낙폭)
//! - 수익률 차트 포인트 변환
//! - 두 결과를 묶은 백테스트 리포트

pub mod charts;
pub mod error;
pub mod performance;
pub mod report;

pub use charts::{project, PercentPoint};
pub use error::{StatsError, StatsResult};
pub use performance::stats::{
    max_drawdown, DrawdownTracker, ProfitPerTrade, StatsDisplay, StatsRecord, NOT_APPLICABLE,
};
pub use report::BacktestReport;
