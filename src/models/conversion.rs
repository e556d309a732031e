use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Валюты, которые показываются в подсказке конвертера
pub const SUPPORTED_CODES: [&str; 9] = ["USD", "EUR", "RUB", "TJS", "UZB", "KZT", "KGS", "CNY", "GBP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected `<amount> <BASE> TO <TARGET>`")]
pub struct ParseConversionError;

/// Запрос вида `100 USD to RUB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub base: String,
    pub target: String,
}

impl FromStr for ConversionRequest {
    type Err = ParseConversionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_uppercase();
        let parts: Vec<&str> = text.split_whitespace().collect();

        let [amount, base, to, target] = parts.as_slice() else {
            return Err(ParseConversionError);
        };
        if *to != "TO" {
            return Err(ParseConversionError);
        }

        Ok(Self {
            amount: parse_amount(amount)?,
            base: base.to_string(),
            target: target.to_string(),
        })
    }
}

impl ConversionRequest {
    /// Сумма в целевой валюте, округлённая до копеек по банковскому правилу.
    /// `None`, если курс или произведение не помещаются в `Decimal`.
    pub fn convert(&self, rate: f64) -> Option<Decimal> {
        let rate = Decimal::from_f64(rate)?;
        let converted = self.amount.checked_mul(rate)?;
        Some(converted.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
    }
}

fn parse_amount(token: &str) -> Result<Decimal, ParseConversionError> {
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .map_err(|_| ParseConversionError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(text: &str) -> Result<ConversionRequest, ParseConversionError> {
        text.parse()
    }

    #[test]
    fn test_parse_valid() {
        let request = parse("100 USD TO RUB").unwrap();
        assert_eq!(
            request,
            ConversionRequest {
                amount: dec!(100),
                base: "USD".to_string(),
                target: "RUB".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let request = parse("  2.5 eur to kzt ").unwrap();
        assert_eq!(request.amount, dec!(2.5));
        assert_eq!(request.base, "EUR");
        assert_eq!(request.target, "KZT");
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let request = parse("10\tusd   To\nrub").unwrap();
        assert_eq!(request.amount, dec!(10));
        assert_eq!(request.target, "RUB");
    }

    #[test]
    fn test_parse_scientific_amount() {
        assert_eq!(parse("1e3 USD TO RUB").unwrap().amount, dec!(1000));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse("abc USD TO RUB"), Err(ParseConversionError));
        assert_eq!(parse("100 USD RUB"), Err(ParseConversionError));
        assert_eq!(parse("100 USD TO"), Err(ParseConversionError));
        assert_eq!(parse("100 USD IN RUB"), Err(ParseConversionError));
        assert_eq!(parse("100 USD TO RUB NOW"), Err(ParseConversionError));
        assert_eq!(parse(""), Err(ParseConversionError));
        assert_eq!(parse("nan USD TO RUB"), Err(ParseConversionError));
        assert_eq!(parse("inf USD TO RUB"), Err(ParseConversionError));
    }

    #[test]
    fn test_parse_allows_negative_and_zero() {
        assert_eq!(parse("-5 USD TO RUB").unwrap().amount, dec!(-5));
        assert_eq!(parse("0 USD TO RUB").unwrap().amount, dec!(0));
    }

    #[test]
    fn test_parse_does_not_check_codes() {
        let request = parse("1 XXX TO YYY").unwrap();
        assert_eq!(request.base, "XXX");
        assert_eq!(request.target, "YYY");
    }

    #[test]
    fn test_convert() {
        let request = parse("50 EUR TO RUB").unwrap();
        assert_eq!(request.convert(100.0), Some(dec!(5000)));

        let request = parse("3 USD TO RUB").unwrap();
        assert_eq!(request.convert(92.1234), Some(dec!(276.37)));
    }

    #[test]
    fn test_convert_rounds_half_to_even() {
        let request = parse("1.005 USD TO USD").unwrap();
        assert_eq!(request.convert(1.0), Some(dec!(1.00)));

        let request = parse("1.015 USD TO USD").unwrap();
        assert_eq!(request.convert(1.0), Some(dec!(1.02)));

        let request = parse("-1.005 USD TO USD").unwrap();
        assert_eq!(request.convert(1.0), Some(dec!(-1.00)));
    }

    #[test]
    fn test_convert_overflow() {
        let request = parse("79000000000000000000000000000 USD TO RUB").unwrap();
        assert_eq!(request.convert(1000.0), None);
    }
}
