//! 알고리즘 목록 명령어.

use dashboard_core::{AlgorithmKind, AlgorithmParams, MAX_SLOTS};

/// 지원하는 알고리즘과 파라미터 목록 문자열을 만듭니다.
pub fn algorithm_table() -> String {
    let mut lines = vec![
        format!("  {:<18} | 파라미터", "알고리즘"),
        "  ─────────────────────────────────────────────────────────────".to_string(),
    ];

    for kind in AlgorithmKind::ALL {
        let params = kind.parameter_names();
        let params = if params.is_empty() {
            "-".to_string()
        } else {
            params.join(", ")
        };
        lines.push(format!("  {:<18} | {}", kind.tag(), params));
    }

    lines.join("\n")
}

/// 사용 가능한 알고리즘 목록 출력
pub fn print_available_algorithms() {
    let defaults = AlgorithmParams::default();

    println!("\n📋 사용 가능한 알고리즘 목록 (최대 {}개 슬롯):", MAX_SLOTS);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("{}", algorithm_table());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("예시 설정 파일 (config/default.toml):");
    println!("  [algorithms]");
    println!("  slots = [\"ema\", \"rsi\"]");
    println!("  ");
    println!("  [algorithms.params]");
    println!("  ema_period_open = {:?}", defaults.ema_period_open);
    println!("  rsi_length = {:?}", defaults.rsi_length);
}
