//! 설정 로드와 명령행 덮어쓰기.

use anyhow::{Context, Result};
use dashboard_core::{DashboardConfig, Timeframe, DEFAULT_CONFIG_PATH};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::debug;

/// 명령행에서 지정한 설정 덮어쓰기.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// 백엔드 기본 URL
    pub base_url: Option<String>,
    /// 심볼
    pub symbol: Option<String>,
    /// 타임프레임
    pub timeframe: Option<Timeframe>,
    /// 알고리즘 슬롯 (비어 있으면 설정 파일 값 유지)
    pub algorithms: Vec<String>,
    /// 수수료 목록 (비어 있으면 설정 파일 값 유지)
    pub commissions: Vec<Decimal>,
}

impl CliOverrides {
    /// 설정에 덮어쓰기를 적용합니다.
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(symbol) = &self.symbol {
            config.series.symbol = symbol.to_uppercase();
        }
        if let Some(timeframe) = self.timeframe {
            config.series.timeframe = timeframe;
        }
        if !self.algorithms.is_empty() {
            config.algorithms.slots = self.algorithms.clone();
        }
        if !self.commissions.is_empty() {
            config.backtest.commissions = self.commissions.clone();
        }
    }
}

/// 설정을 로드하고 덮어쓰기를 적용한 뒤 검증합니다.
///
/// 경로를 지정하지 않으면 기본 설정 파일이 있을 때만 읽고, 없으면 기본값과 환경 변수만 사용합니다.
/// 검증은 덮어쓰기를 적용한 뒤 한 번만 하므로, 파일의 잘못된 값을 명령행으로 고칠 수 있습니다.
pub fn load_config(path: Option<&str>, overrides: &CliOverrides) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => DashboardConfig::read(Some(Path::new(path)))
            .with_context(|| format!("설정 파일을 읽을 수 없습니다: {}", path))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            DashboardConfig::read(Some(Path::new(DEFAULT_CONFIG_PATH)))?
        }
        None => DashboardConfig::read(None)?,
    };

    overrides.apply(&mut config);
    config.validate()?;

    debug!(
        base_url = %config.server.base_url,
        symbol = %config.series.symbol,
        timeframe = %config.series.timeframe,
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::ConfigurationError;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_apply_overrides() {
        let mut config = DashboardConfig::default();
        let overrides = CliOverrides {
            base_url: Some("http://backend:9000".to_string()),
            symbol: Some("btcusdt".to_string()),
            timeframe: Some(Timeframe::H1),
            algorithms: vec!["macd".to_string(), "rsi".to_string()],
            commissions: vec![dec!(0.075)],
        };

        overrides.apply(&mut config);
        assert_eq!(config.server.base_url, "http://backend:9000");
        assert_eq!(config.series.symbol, "BTCUSDT");
        assert_eq!(config.series.timeframe, Timeframe::H1);
        assert_eq!(config.algorithms.slots, vec!["macd", "rsi"]);
        assert_eq!(config.backtest.commissions, vec![dec!(0.075)]);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = DashboardConfig::default();
        CliOverrides::default().apply(&mut config);
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_load_config_rejects_three_algorithms() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[series]\nsymbol = \"ETHUSDT\"\n").unwrap();

        let overrides = CliOverrides {
            algorithms: vec!["ema".into(), "rsi".into(), "bb".into()],
            ..Default::default()
        };
        let path = file.path().to_string_lossy().to_string();
        let err = load_config(Some(path.as_str()), &overrides).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::InvalidSlotCount(3))
        );
    }

    #[test]
    fn test_algorithm_override_replaces_invalid_file_slots() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[algorithms]\nslots = [\"ichimoku\"]\n").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let err = load_config(Some(path.as_str()), &CliOverrides::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::UnknownAlgorithm("ichimoku".to_string()))
        );

        let overrides = CliOverrides {
            algorithms: vec!["rsi".to_string()],
            ..Default::default()
        };
        let config = load_config(Some(path.as_str()), &overrides).unwrap();
        assert_eq!(config.algorithms.slots, vec!["rsi"]);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[series]\nsymbol = \"ETHUSDT\"\ntimes = 3\n").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = load_config(Some(path.as_str()), &CliOverrides::default()).unwrap();
        assert_eq!(config.series.symbol, "ETHUSDT");
        assert_eq!(config.series.times, 3);
    }
}
