//! 費用金額與公式解析

use fba_core::FeeAmount;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 解析數字，處理千分位與小數逗號
///
/// 最後出現的分隔符號為小數點：`1,234.50` 與 `1.234,56` 皆可。
/// 只有逗號時，`1,234` 視為千分位、`3,50` 視為小數逗號；
/// 千分位分組不完整或小數逗號後超過兩位（`1,2345`、`1.234,567`）則拒絕。
pub fn parse_number(raw: &str) -> Result<Decimal, String> {
    let s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '£' | '€' | '¥' | '￥'))
        .collect();
    let invalid = || format!("無法解析金額 '{}'", raw);

    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let normalized = match (body.rfind('.'), body.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => {
            let fraction = &body[comma + 1..];
            if !(1..=2).contains(&fraction.len()) || !is_digits(fraction) {
                return Err(invalid());
            }
            strip_grouping(&body[..comma], '.').map(|int| format!("{}.{}", int, fraction))
        }
        (Some(dot), Some(_)) => {
            let fraction = &body[dot + 1..];
            if !is_digits(fraction) {
                return Err(invalid());
            }
            strip_grouping(&body[..dot], ',').map(|int| format!("{}.{}", int, fraction))
        }
        (None, Some(comma)) => strip_grouping(body, ',').or_else(|| {
            let (int, fraction) = (&body[..comma], &body[comma + 1..]);
            (is_digits(int) && is_digits(fraction) && fraction.len() <= 2)
                .then(|| format!("{}.{}", int, fraction))
        }),
        _ => Some(body.to_string()),
    }
    .ok_or_else(invalid)?;

    Decimal::from_str(&format!("{}{}", sign, normalized)).map_err(|_| invalid())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// 去除千分位：首組 1 至 3 位，其後每組恰為 3 位
fn strip_grouping(int: &str, separator: char) -> Option<String> {
    let mut groups = int.split(separator);
    let head = groups.next()?;
    if !is_digits(head) || head.len() > 3 {
        return None;
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// 解析費用欄位：固定金額或以計費重量表示的線性公式
///
/// 公式中的重量可寫成 `W`、`weight` 或 `发货重量`，支援：
/// `base+(W-t)*rate`、`base+rate*(W-t)`、`base+ceil((W-t)/step)*rate`。
pub fn parse_amount(raw: &str) -> Result<FeeAmount, String> {
    let s: String = raw
        .replace("发货重量", "W")
        .replace("發貨重量", "W")
        .to_lowercase()
        .replace("weight", "W")
        .replace('w', "W")
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | '£' | '€' | '¥' | '￥'))
        .collect();

    if s.is_empty() {
        return Err("空白的費用欄位".to_string());
    }

    if s.contains('W') {
        parse_formula(&s).ok_or_else(|| format!("無法解析費用公式 '{}'", raw))
    } else {
        parse_number(&s).map(FeeAmount::Fixed)
    }
}

fn parse_formula(s: &str) -> Option<FeeAmount> {
    let (base, term) = s.split_once('+')?;
    let base = parse_number(base).ok()?;

    let (threshold, rate, step) = if let Some(rest) = term.strip_prefix("ceil((W-") {
        let (threshold, rest) = rest.split_once(")/")?;
        let (step, rate) = rest.split_once(")*")?;
        (threshold, rate, Some(step))
    } else if let Some(rest) = term.strip_prefix("(W-") {
        let (threshold, rate) = rest.split_once(")*")?;
        (threshold, rate, None)
    } else {
        let (rate, rest) = term.split_once("*(W-")?;
        (rest.strip_suffix(')')?, rate, None)
    };

    let threshold = parse_number(threshold).ok()?;
    let rate = parse_number(rate).ok()?;
    match step {
        // 公式中的費率是每一步長的金額，換算成每單位重量
        Some(step) => {
            let step = parse_number(step).ok().filter(|s| *s > Decimal::ZERO)?;
            Some(FeeAmount::Linear {
                base,
                threshold,
                rate: rate.checked_div(step)?,
                step: Some(step),
            })
        }
        None => Some(FeeAmount::Linear {
            base,
            threshold,
            rate,
            step: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("$3.22", dec!(3.22))]
    #[case("£2.10", dec!(2.10))]
    #[case("€3,50", dec!(3.50))]
    #[case("$1,234.50", dec!(1234.50))]
    #[case("1,234", dec!(1234))]
    #[case(" 7 ", dec!(7))]
    #[case("€1.234,56", dec!(1234.56))]
    #[case("1.234.567,8", dec!(1234567.8))]
    #[case("$1,234,567.25", dec!(1234567.25))]
    #[case("12345,6", dec!(12345.6))]
    #[case("-2,5", dec!(-2.5))]
    fn test_number(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_number(raw), Ok(expected));
    }

    #[test]
    fn test_fixed_amount() {
        assert_eq!(parse_amount("$3.22"), Ok(FeeAmount::Fixed(dec!(3.22))));
    }

    #[rstest]
    #[case("6.92+(W-3)*0.16")]
    #[case("$6.92 + (发货重量 - 3) * 0.16")]
    #[case("6.92+0.16*(weight-3)")]
    fn test_linear_formula(#[case] raw: &str) {
        let expected = FeeAmount::Linear {
            base: dec!(6.92),
            threshold: dec!(3),
            rate: dec!(0.16),
            step: None,
        };
        assert_eq!(parse_amount(raw), Ok(expected));
    }

    #[test]
    fn test_stepped_formula() {
        let amount = parse_amount("9.61+ceil((W-3)/0.5)*0.08").unwrap();
        assert_eq!(
            amount,
            FeeAmount::Linear {
                base: dec!(9.61),
                threshold: dec!(3),
                rate: dec!(0.16),
                step: Some(dec!(0.5)),
            }
        );
        // 3.2 磅超出 0.2，進位成一個半磅
        assert_eq!(amount.evaluate(dec!(3.2)).unwrap(), dec!(9.69));
    }

    #[rstest]
    #[case("1.23,45")]
    #[case("1,2345")]
    #[case("1.234,567")]
    #[case("12,34.5")]
    #[case("1,234.")]
    fn test_ambiguous_number(#[case] raw: &str) {
        assert!(parse_number(raw).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("W*2")]
    #[case("1,2,3")]
    fn test_invalid_amount(#[case] raw: &str) {
        assert!(parse_amount(raw).is_err());
    }
}
