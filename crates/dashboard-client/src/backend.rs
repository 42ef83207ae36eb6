//! 백테스트 백엔드 추상화.

use crate::error::ClientResult;
use crate::request::{BacktestQuery, KlineRequest, MultiRequest};
use async_trait::async_trait;
use dashboard_core::{AnnotatedKline, Kline};

/// 캔들/백테스트 백엔드.
///
/// 각 메서드는 정확히 한 번의 요청을 보내며 재시도하지 않습니다.
#[async_trait]
pub trait BacktestBackend: Send + Sync {
    /// 알고리즘 신호가 붙은 캔들을 조회합니다.
    async fn fetch_klines(&self, request: &KlineRequest) -> ClientResult<Vec<Kline>>;

    /// 캔들 시리즈를 백테스트합니다.
    ///
    /// 응답은 입력 순서를 유지한 채 누적 수익률이 붙은 캔들입니다.
    async fn post_backtest(
        &self,
        klines: &[Kline],
        query: &BacktestQuery,
    ) -> ClientResult<Vec<AnnotatedKline>>;

    /// 상위 심볼 여러 개의 캔들을 조회합니다.
    async fn fetch_multi(&self, request: &MultiRequest) -> ClientResult<Vec<Vec<Kline>>>;

    /// 백엔드 이름 (로그용).
    fn name(&self) -> &str;
}
