//! 백테스트 요청 오케스트레이션.
//!
//! 설정 → 요청 페이로드 변환과 백엔드 호출을 묶습니다. 호출 간에 공유하는 가변 상태가 없으므로
//! 여러 수수료에 대한 백테스트를 동시에 실행해도 서로 간섭하지 않습니다.

use crate::backend::BacktestBackend;
use crate::error::{ClientError, ClientResult};
use crate::request::{BacktestQuery, KlineRequest, MultiRequest};
use dashboard_core::{backtest_span, AnnotatedKline, DashboardConfig, Kline};
use tracing::{info, Instrument};

/// 백테스트 오케스트레이터.
#[derive(Debug, Clone)]
pub struct BacktestOrchestrator<B> {
    backend: B,
}

impl<B: BacktestBackend> BacktestOrchestrator<B> {
    /// 새 오케스트레이터를 생성합니다.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// 내부 백엔드 참조.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 설정의 시리즈와 알고리즘 슬롯으로 캔들을 조회합니다.
    ///
    /// 알고리즘 인코딩이 실패하면 요청을 보내지 않고 설정 에러를 반환합니다.
    pub async fn load_klines(&self, config: &DashboardConfig) -> ClientResult<Vec<Kline>> {
        let request = KlineRequest::from_config(config)?;
        let span = backtest_span!("load_klines", request.symbol);

        async {
            info!(
                backend = self.backend.name(),
                timeframe = %request.timeframe,
                algorithms = request.algorithms.len(),
                "Loading klines"
            );
            let klines = self.backend.fetch_klines(&request).await?;
            info!(count = klines.len(), "Klines loaded");
            Ok::<_, ClientError>(klines)
        }
        .instrument(span)
        .await
    }

    /// 캔들 시리즈를 백테스트합니다.
    ///
    /// 정확히 한 번의 요청을 보내고, 실패는 그대로 반환합니다.
    pub async fn run_backtest(
        &self,
        klines: &[Kline],
        query: &BacktestQuery,
    ) -> ClientResult<Vec<AnnotatedKline>> {
        info!(
            backend = self.backend.name(),
            commission = %query.commission,
            mode = %query.mode,
            klines = klines.len(),
            "Running backtest"
        );
        let annotated = self.backend.post_backtest(klines, query).await?;
        info!(
            commission = %query.commission,
            count = annotated.len(),
            "Backtest completed"
        );
        Ok(annotated)
    }

    /// 상위 심볼 여러 개의 캔들을 조회합니다.
    pub async fn run_multi(&self, config: &DashboardConfig) -> ClientResult<Vec<Vec<Kline>>> {
        let request = MultiRequest::from_config(config)?;
        info!(
            backend = self.backend.name(),
            rank = request.rank,
            auto_params = request.auto_params,
            "Loading multi-series klines"
        );
        let series = self.backend.fetch_multi(&request).await?;
        info!(series = series.len(), "Multi-series klines loaded");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dashboard_core::{AlgorithmSelection, BacktestMode};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// 호출을 기록하는 가짜 백엔드.
    #[derive(Default)]
    struct RecordingBackend {
        kline_requests: Mutex<Vec<KlineRequest>>,
        backtest_queries: Mutex<Vec<BacktestQuery>>,
        fail_with_status: Option<u16>,
    }

    #[async_trait]
    impl BacktestBackend for RecordingBackend {
        async fn fetch_klines(&self, request: &KlineRequest) -> ClientResult<Vec<Kline>> {
            self.kline_requests.lock().unwrap().push(request.clone());
            Ok(vec![Kline::new(1_000), Kline::new(2_000).with_signal("BUY")])
        }

        async fn post_backtest(
            &self,
            klines: &[Kline],
            query: &BacktestQuery,
        ) -> ClientResult<Vec<AnnotatedKline>> {
            self.backtest_queries.lock().unwrap().push(query.clone());
            if let Some(status) = self.fail_with_status {
                return Err(ClientError::Status {
                    status,
                    body: "boom".to_string(),
                });
            }
            Ok(klines
                .iter()
                .map(|k| AnnotatedKline::new(k.times.open, dec!(0)))
                .collect())
        }

        async fn fetch_multi(&self, _request: &MultiRequest) -> ClientResult<Vec<Vec<Kline>>> {
            Ok(vec![vec![Kline::new(1_000)], vec![]])
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_config_error_makes_no_call() {
        let orchestrator = BacktestOrchestrator::new(RecordingBackend::default());
        let mut config = DashboardConfig::default();
        config.algorithms.slots = vec!["nope".to_string()];

        let err = orchestrator.load_klines(&config).await.unwrap_err();
        assert!(err.is_configuration());
        assert!(orchestrator.backend().kline_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_slots_in_order() {
        let orchestrator = BacktestOrchestrator::new(RecordingBackend::default());
        let mut config = DashboardConfig::default();
        config.algorithms.slots = vec!["macd".to_string(), "dca".to_string()];

        let klines = orchestrator.load_klines(&config).await.unwrap();
        assert_eq!(klines.len(), 2);

        let requests = orchestrator.backend().kline_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].algorithms,
            vec![
                AlgorithmSelection::Macd {
                    fast: 12,
                    slow: 26,
                    signal: 9
                },
                AlgorithmSelection::Dca,
            ]
        );
    }

    #[tokio::test]
    async fn test_backtest_single_call_preserves_order() {
        let orchestrator = BacktestOrchestrator::new(RecordingBackend::default());
        let klines = vec![Kline::new(3_000), Kline::new(1_000)];
        let query = BacktestQuery::new(dec!(0.1), BacktestMode::FlowingProfit(true));

        let annotated = orchestrator.run_backtest(&klines, &query).await.unwrap();
        let times: Vec<i64> = annotated.iter().map(|k| k.times.open).collect();
        assert_eq!(times, vec![3_000, 1_000]);

        let queries = orchestrator.backend().backtest_queries.lock().unwrap();
        assert_eq!(queries.as_slice(), &[query]);
    }

    #[tokio::test]
    async fn test_backtest_failure_is_not_retried() {
        let orchestrator = BacktestOrchestrator::new(RecordingBackend {
            fail_with_status: Some(500),
            ..Default::default()
        });
        let query = BacktestQuery::new(dec!(0), BacktestMode::default());

        let err = orchestrator
            .run_backtest(&[Kline::new(1_000)], &query)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(orchestrator.backend().backtest_queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_multi() {
        let orchestrator = BacktestOrchestrator::new(RecordingBackend::default());
        let series = orchestrator.run_multi(&DashboardConfig::default()).await.unwrap();
        assert_eq!(series.len(), 2);
    }
}
