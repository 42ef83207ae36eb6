//! 수익률 표기를 위한 Decimal 유틸리티.
//!
//! 백엔드가 내려주는 누적 수익률은 이미 퍼센트 단위입니다 (15 = 15%).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal 표기 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 멀어지는 방향).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 고정 소수점 문자열로 변환합니다 (예: `to_fixed(2)` → "15.00").
    fn to_fixed(&self, dp: u32) -> String;

    /// 퍼센트 문자열로 변환합니다 (예: `to_percent_string(2)` → "15.00%").
    fn to_percent_string(&self, dp: u32) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_fixed(&self, dp: u32) -> String {
        format!("{:.*}", dp as usize, self.round_half_up(dp))
    }

    fn to_percent_string(&self, dp: u32) -> String {
        format!("{}%", self.to_fixed(dp))
    }
}
