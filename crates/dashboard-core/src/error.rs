//! 설정 에러 타입.
//!
//! 요청을 만들기 전에 발견되는 모든 문제는 [`ConfigurationError`]로 보고되며,
//! 이 에러가 발생하면 네트워크 호출은 일어나지 않습니다.

use crate::domain::AlgorithmKind;
use thiserror::Error;

/// 설정 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// 알 수 없는 알고리즘 태그
    #[error("알 수 없는 알고리즘: {0}")]
    UnknownAlgorithm(String),

    /// 슬롯에 필요한 파라미터 누락
    #[error("{algorithm} 알고리즘의 슬롯 {slot}에 '{field}' 파라미터가 없습니다")]
    MissingParameter {
        algorithm: AlgorithmKind,
        field: &'static str,
        slot: usize,
    },

    /// 허용 범위를 벗어난 슬롯 인덱스
    #[error("잘못된 슬롯 인덱스: {slot} (최대 {max}개)")]
    SlotOutOfRange { slot: usize, max: usize },

    /// 알고리즘 슬롯 수 오류
    #[error("알고리즘 슬롯은 1~2개여야 합니다 (현재 {0}개)")]
    InvalidSlotCount(usize),

    /// 잘못된 설정 값
    #[error("잘못된 설정 값: {0}")]
    Invalid(String),

    /// 설정 파일/환경 변수 로드 실패
    #[error("설정 로드 실패: {0}")]
    Load(String),
}

/// 설정 작업을 위한 Result 타입.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

impl From<::config::ConfigError> for ConfigurationError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigurationError::Load(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigurationError::MissingParameter {
            algorithm: AlgorithmKind::Ema,
            field: "periodOpen",
            slot: 1,
        };
        assert_eq!(
            err.to_string(),
            "ema 알고리즘의 슬롯 1에 'periodOpen' 파라미터가 없습니다"
        );
    }
}
