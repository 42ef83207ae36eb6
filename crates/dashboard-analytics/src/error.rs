//! 통계 계산 에러.

use thiserror::Error;

/// 통계 계산 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// 비어 있는 시리즈 (마지막 봉이 없음)
    #[error("빈 시리즈에서는 통계를 계산할 수 없습니다")]
    EmptySeries,
}

/// 통계 계산을 위한 Result 타입.
pub type StatsResult<T> = Result<T, StatsError>;
