//! # Dashboard Core
//!
//! 캔들 대시보드의 핵심 도메인 모델과 공통 인프라를 제공합니다:
//! - 알고리즘 선택 및 요청 페이로드 인코딩
//! - 백엔드 캔들 타입 (신호/누적 수익률 포함)
//! - 타임프레임과 퍼센트 표기 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
