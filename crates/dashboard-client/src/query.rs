//! 쿼리 문자열 생성.

use std::fmt::Display;

/// 기본 주소 뒤에 쿼리 파라미터를 붙입니다.
///
/// 첫 파라미터는 `?key=value`, 이후 파라미터는 `&key=value` 형태로 입력 순서대로 붙습니다.
/// 파라미터가 없으면 기본 주소를 그대로 반환합니다.
///
/// 값은 URL 인코딩하지 않습니다. `&`, `=`, `#`, 공백 등 예약 문자가 들어갈 수 있는 값은
/// 호출자가 미리 안전한 형태로 만들어야 합니다.
///
/// ```
/// use dashboard_client::build_url;
///
/// let url = build_url("http://127.0.0.1:3000/backtest", [("commission", "0.1"), ("type", "long")]);
/// assert_eq!(url, "http://127.0.0.1:3000/backtest?commission=0.1&type=long");
/// ```
pub fn build_url<I, K, V>(base: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut url = base.to_string();

    for (index, (key, value)) in params.into_iter().enumerate() {
        url.push(if index == 0 { '?' } else { '&' });
        url.push_str(&format!("{}={}", key, value));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:3000/backtest";

    #[test]
    fn test_no_params_returns_base() {
        let empty: [(&str, i32); 0] = [];
        assert_eq!(build_url(BASE, empty), BASE);
    }

    #[test]
    fn test_single_param() {
        assert_eq!(build_url(BASE, [("a", 1)]), format!("{}?a=1", BASE));
    }

    #[test]
    fn test_params_keep_insertion_order() {
        assert_eq!(
            build_url(BASE, [("a", 1), ("b", 2)]),
            format!("{}?a=1&b=2", BASE)
        );
        assert_eq!(
            build_url(BASE, vec![("b", "2"), ("a", "1"), ("c", "3")]),
            format!("{}?b=2&a=1&c=3", BASE)
        );
    }

    #[test]
    fn test_values_are_not_url_encoded() {
        // 알려진 한계: 예약 문자가 그대로 들어가 쿼리 구조가 깨집니다.
        let url = build_url(BASE, [("symbol", "BTC&USDT"), ("note", "a b")]);
        assert_eq!(url, format!("{}?symbol=BTC&USDT&note=a b", BASE));
    }
}
