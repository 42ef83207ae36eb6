//! 수익률 차트 데이터
//!
//! 백테스트 결과 캔들을 차트 렌더러가 바로 사용할 수 있는 (시간, 누적 수익률) 점으로 변환합니다.
//! 렌더링 자체는 이 크레이트의 책임이 아닙니다.

use dashboard_core::{AnnotatedKline, Timestamped};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 수익률 차트 데이터 포인트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentPoint {
    /// X축 값 (캔들 시작 시간, 밀리초)
    pub x: i64,

    /// Y축 값 (누적 수익률, %)
    #[serde(with = "rust_decimal::serde::float")]
    pub y: Decimal,
}

impl PercentPoint {
    /// 새로운 차트 포인트를 생성합니다.
    pub fn new(x: i64, y: Decimal) -> Self {
        Self { x, y }
    }
}

impl From<&AnnotatedKline> for PercentPoint {
    fn from(kline: &AnnotatedKline) -> Self {
        Self::new(kline.open_time(), kline.percent_profit)
    }
}

/// 백테스트 결과를 차트 포인트로 변환합니다.
///
/// 입력과 같은 순서, 같은 개수의 포인트를 반환하며 어떤 캔들도 걸러내지 않습니다.
pub fn project(series: &[AnnotatedKline]) -> Vec<PercentPoint> {
    series.iter().map(PercentPoint::from).collect()
}
