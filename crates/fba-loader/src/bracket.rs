//! 級距字串解析
//!
//! 支援 `(3,20]磅`、`<=20g`、`<10`、`>150`、`[10,50]` 等寫法，單位文字一律忽略。

use fba_core::{BracketBound, Interval};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 只保留數字與區間符號
fn clean(raw: &str) -> String {
    raw.replace('≤', "<=")
        .replace('≥', ">=")
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '(' | ')' | '[' | ']' | '<' | '>' | '=' | '-'))
        .collect()
}

fn number(text: &str, raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(text.trim()).map_err(|_| format!("無法解析級距數值 '{}'", raw))
}

/// 拆開 `(a,b]` 形式，回傳 (下界, 上界, 上界是否包含)
fn split_range<'a>(s: &'a str, raw: &str) -> Result<(&'a str, &'a str, bool), String> {
    let inclusive = if s.ends_with(']') {
        true
    } else if s.ends_with(')') {
        false
    } else {
        return Err(format!("級距缺少右括號 '{}'", raw));
    };
    let inner = &s[1..s.len() - 1];
    let (lower, upper) = inner
        .split_once(',')
        .ok_or_else(|| format!("級距缺少逗號 '{}'", raw))?;
    Ok((lower, upper, inclusive))
}

/// 解析費用級距的上界
pub fn parse_upper_bound(raw: &str) -> Result<BracketBound, String> {
    let s = clean(raw);
    if s.is_empty() {
        return Err(format!("空白級距 '{}'", raw));
    }

    if let Some(rest) = s.strip_prefix("<=") {
        return Ok(BracketBound::Inclusive(number(rest, raw)?));
    }
    if let Some(rest) = s.strip_prefix('<') {
        return Ok(BracketBound::Exclusive(number(rest, raw)?));
    }
    if let Some(rest) = s.strip_prefix(">=").or_else(|| s.strip_prefix('>')) {
        number(rest, raw)?;
        return Ok(BracketBound::Unbounded);
    }
    if s.starts_with('(') || s.starts_with('[') {
        let (lower, upper, inclusive) = split_range(&s, raw)?;
        if !lower.is_empty() {
            number(lower, raw)?;
        }
        if upper.is_empty() {
            return Ok(BracketBound::Unbounded);
        }
        let upper = number(upper, raw)?;
        return Ok(if inclusive {
            BracketBound::Inclusive(upper)
        } else {
            BracketBound::Exclusive(upper)
        });
    }

    Ok(BracketBound::Inclusive(number(&s, raw)?))
}

/// 解析分段規則的區間條件（空白代表無界）
///
/// 分段區間固定為 (lower, upper]，其他開閉組合會被拒絕。
pub fn parse_interval(raw: &str) -> Result<Interval, String> {
    let s = clean(raw);
    if s.is_empty() {
        return Ok(Interval::UNBOUNDED);
    }

    if let Some(rest) = s.strip_prefix("<=") {
        return Ok(Interval::at_most(number(rest, raw)?));
    }
    if let Some(rest) = s.strip_prefix('>') {
        if rest.starts_with('=') {
            return Err(format!("分段區間不支援 >= '{}'", raw));
        }
        return Ok(Interval::above(number(rest, raw)?));
    }
    if s.starts_with('(') {
        let (lower, upper, inclusive) = split_range(&s, raw)?;
        return match (lower.is_empty(), upper.is_empty()) {
            (_, false) if !inclusive => Err(format!("分段區間上界必須包含 '{}'", raw)),
            (true, true) => Ok(Interval::UNBOUNDED),
            (true, false) => Ok(Interval::at_most(number(upper, raw)?)),
            (false, true) => Ok(Interval::above(number(lower, raw)?)),
            (false, false) => Ok(Interval::between(number(lower, raw)?, number(upper, raw)?)),
        };
    }
    if s.starts_with('<') || s.starts_with('[') {
        return Err(format!("分段區間必須為 (lower, upper] '{}'", raw));
    }

    Ok(Interval::at_most(number(&s, raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("(3,20]磅", BracketBound::Inclusive(dec!(20)))]
    #[case("<=20g", BracketBound::Inclusive(dec!(20)))]
    #[case("≤ 0.5 lb", BracketBound::Inclusive(dec!(0.5)))]
    #[case("<10", BracketBound::Exclusive(dec!(10)))]
    #[case("[10,50]", BracketBound::Inclusive(dec!(50)))]
    #[case(">50", BracketBound::Unbounded)]
    #[case(">150磅", BracketBound::Unbounded)]
    #[case("(150,]", BracketBound::Unbounded)]
    #[case("12 oz", BracketBound::Inclusive(dec!(12)))]
    fn test_upper_bound(#[case] raw: &str, #[case] expected: BracketBound) {
        assert_eq!(parse_upper_bound(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("磅")]
    #[case("(3,20")]
    #[case("<=abc")]
    fn test_invalid_upper_bound(#[case] raw: &str) {
        assert!(parse_upper_bound(raw).is_err());
    }

    #[rstest]
    #[case("", Interval::UNBOUNDED)]
    #[case("<=15", Interval::at_most(dec!(15)))]
    #[case("0.75", Interval::at_most(dec!(0.75)))]
    #[case(">150", Interval::above(dec!(150)))]
    #[case("(50,70]", Interval::between(dec!(50), dec!(70)))]
    #[case("(15000,]", Interval::above(dec!(15000)))]
    fn test_interval(#[case] raw: &str, #[case] expected: Interval) {
        assert_eq!(parse_interval(raw), Ok(expected));
    }

    #[rstest]
    #[case("<15")]
    #[case("[10,50]")]
    #[case("(10,50)")]
    #[case(">=3")]
    fn test_interval_rejects_other_shapes(#[case] raw: &str) {
        assert!(parse_interval(raw).is_err());
    }
}
