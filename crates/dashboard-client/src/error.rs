//! 백엔드 클라이언트 에러.
//!
//! 네트워크 실패와 HTTP 오류 상태는 가공하지 않고 호출자에게 그대로 전달합니다.
//! 재시도는 하지 않습니다.

use dashboard_core::ConfigurationError;
use thiserror::Error;

/// 백엔드 클라이언트 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 요청을 만들기 전 발견된 설정 에러 (네트워크 호출 없음)
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// 연결 실패, 타임아웃 등 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(#[from] reqwest::Error),

    /// 성공이 아닌 HTTP 상태
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 응답 본문 해석 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 클라이언트 작업을 위한 Result 타입.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// 전송 계층 에러(네트워크 실패 또는 HTTP 오류 상태)인지 확인합니다.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Status { .. })
    }

    /// 설정 에러인지 확인합니다.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ClientError::Configuration(_))
    }

    /// HTTP 상태 코드 (있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
