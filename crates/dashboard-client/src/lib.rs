//! # Dashboard Client
//!
//! 캔들/백테스트 백엔드와 통신하는 클라이언트입니다.
//!
//! - [`build_url`]: 쿼리 문자열 생성
//! - [`KlineRequest`], [`MultiRequest`], [`BacktestQuery`]: 요청 페이로드
//! - [`BacktestBackend`]: 백엔드 추상화, [`HttpBackend`]: reqwest 구현
//! - [`BacktestOrchestrator`]: 설정 → 요청 → 응답 흐름

pub mod backend;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod request;

pub use backend::BacktestBackend;
pub use error::{ClientError, ClientResult};
pub use http::{HttpBackend, BACKTEST_PATH, KLINES_PATH, MULTI_PATH};
pub use orchestrator::BacktestOrchestrator;
pub use query::build_url;
pub use request::{BacktestQuery, KlineRequest, MultiRequest};
