//! 대시보드 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 알고리즘 신호 캔들 조회
//! - 수수료별 동시 백테스트와 통계 출력
//! - 멀티 시리즈 조회
//! - 설정 로드와 명령행 덮어쓰기

pub mod commands;
pub mod settings;

pub use settings::{load_config, CliOverrides};
