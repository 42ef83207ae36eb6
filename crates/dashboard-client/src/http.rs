//! reqwest 기반 HTTP 백엔드.

use crate::backend::BacktestBackend;
use crate::error::{ClientError, ClientResult};
use crate::request::{BacktestQuery, KlineRequest, MultiRequest};
use async_trait::async_trait;
use dashboard_core::{AnnotatedKline, Kline, ServerConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

/// 캔들 조회 엔드포인트.
pub const KLINES_PATH: &str = "/klinesWithAlgorithm";
/// 백테스트 엔드포인트.
pub const BACKTEST_PATH: &str = "/backtest";
/// 멀티 시리즈 엔드포인트.
pub const MULTI_PATH: &str = "/multi";

/// HTTP 백엔드 클라이언트.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// 타임아웃 없이 클라이언트를 생성합니다.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// 요청 타임아웃을 지정해 클라이언트를 생성합니다.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// 서버 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &ServerConfig) -> ClientResult<Self> {
        Self::with_timeout(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// JSON 본문으로 POST 요청을 보내고 응답을 역직렬화합니다.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %url, "Backend request");

        let response = self.client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(url = %url, status = %status, body = %body, "Backend request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        debug!(url = %url, bytes = text.len(), "Backend response received");

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl BacktestBackend for HttpBackend {
    async fn fetch_klines(&self, request: &KlineRequest) -> ClientResult<Vec<Kline>> {
        self.post_json(&self.endpoint(KLINES_PATH), request).await
    }

    async fn post_backtest(
        &self,
        klines: &[Kline],
        query: &BacktestQuery,
    ) -> ClientResult<Vec<AnnotatedKline>> {
        let url = query.url(&self.endpoint(BACKTEST_PATH));
        self.post_json(&url, klines).await
    }

    async fn fetch_multi(&self, request: &MultiRequest) -> ClientResult<Vec<Vec<Kline>>> {
        self.post_json(&self.endpoint(MULTI_PATH), request).await
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:3000");
        assert_eq!(
            backend.endpoint(KLINES_PATH),
            "http://127.0.0.1:3000/klinesWithAlgorithm"
        );
    }

    #[test]
    fn test_from_config() {
        let config = ServerConfig {
            base_url: "http://backend:8080".to_string(),
            timeout_secs: Some(30),
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url(), "http://backend:8080");
        assert_eq!(backend.name(), "http");
    }
}
