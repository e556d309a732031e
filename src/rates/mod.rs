pub mod config;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::config::Settings;
use crate::models::Coin;
use crate::rates::config::{CryptoPricesResponse, FiatRatesResponse, CRYPTO_VS_CURRENCY};

#[derive(Debug, Error)]
pub enum RateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("no {quote} quote in response")]
    MissingQuote { quote: String },

    #[error("provider returned unusable quote {value} for {quote}")]
    InvalidQuote { quote: String, value: f64 },

    #[error("endpoint {0} cannot take path segments")]
    InvalidEndpoint(Url),
}

/// Источник курсов. Каждый вызов делает ровно один запрос, без ретраев и кэша.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Сколько `target` стоит одна единица `base`
    async fn fiat_rate(&self, base: &str, target: &str) -> Result<f64, RateError>;

    /// Цена монеты в USD
    async fn crypto_rate(&self, coin: Coin) -> Result<f64, RateError>;
}

pub struct HttpRateClient {
    client: Client,
    fiat_rates_url: Url,
    crypto_prices_url: Url,
}

impl HttpRateClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            fiat_rates_url: settings.fiat_rates_url.clone(),
            crypto_prices_url: settings.crypto_prices_url.clone(),
        }
    }

    fn fiat_url(&self, base: &str) -> Result<Url, RateError> {
        let mut url = self.fiat_rates_url.clone();
        url.path_segments_mut()
            .map_err(|_| RateError::InvalidEndpoint(self.fiat_rates_url.clone()))?
            .pop_if_empty()
            .push(base);
        Ok(url)
    }
}

#[async_trait]
impl RateProvider for HttpRateClient {
    async fn fiat_rate(&self, base: &str, target: &str) -> Result<f64, RateError> {
        let url = self.fiat_url(base)?;
        log::debug!("🌐 GET {}", url);

        let body = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        fiat_rate_from_body(&body, target)
    }

    async fn crypto_rate(&self, coin: Coin) -> Result<f64, RateError> {
        log::debug!("🌐 GET {} ids={}", self.crypto_prices_url, coin.provider_id());

        let body = self
            .client
            .get(self.crypto_prices_url.clone())
            .query(&[("ids", coin.provider_id()), ("vs_currencies", CRYPTO_VS_CURRENCY)])
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        crypto_rate_from_body(&body, coin.provider_id())
    }
}

pub fn fiat_rate_from_body(body: &str, target: &str) -> Result<f64, RateError> {
    let response = serde_json::from_str::<FiatRatesResponse>(body)?;
    let rate = response
        .rates
        .get(target)
        .copied()
        .ok_or_else(|| RateError::MissingQuote { quote: format!("rates.{target}") })?;

    usable_quote(format!("rates.{target}"), rate)
}

pub fn crypto_rate_from_body(body: &str, coin_id: &str) -> Result<f64, RateError> {
    let response = serde_json::from_str::<CryptoPricesResponse>(body)?;
    let quote = format!("{coin_id}.{CRYPTO_VS_CURRENCY}");
    let price = response
        .get(coin_id)
        .and_then(|prices| prices.get(CRYPTO_VS_CURRENCY))
        .copied()
        .ok_or_else(|| RateError::MissingQuote { quote: quote.clone() })?;

    usable_quote(quote, price)
}

// Нулевой курс считаем отсутствующим
fn usable_quote(quote: String, value: f64) -> Result<f64, RateError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RateError::InvalidQuote { quote, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(fiat: &str) -> HttpRateClient {
        let settings = Settings::from_lookup(|key| match key {
            "FIAT_RATES_URL" => Some(fiat.to_string()),
            _ => None,
        })
        .unwrap();
        HttpRateClient::new(&settings)
    }

    #[test]
    fn test_fiat_rate_from_body() {
        let body = r#"{"base":"USD","date":"2024-05-01","rates":{"USD":1,"RUB":92.57,"EUR":0.93}}"#;
        assert_eq!(fiat_rate_from_body(body, "RUB").unwrap(), 92.57);
        assert_eq!(fiat_rate_from_body(body, "USD").unwrap(), 1.0);
    }

    #[test]
    fn test_fiat_rate_missing_target() {
        let body = r#"{"rates":{"RUB":92.57}}"#;
        let err = fiat_rate_from_body(body, "TJS").unwrap_err();
        assert!(matches!(err, RateError::MissingQuote { ref quote } if quote == "rates.TJS"));
    }

    #[test]
    fn test_fiat_rate_malformed() {
        assert!(matches!(fiat_rate_from_body("<html>", "RUB"), Err(RateError::Payload(_))));
        assert!(matches!(
            fiat_rate_from_body(r#"{"result":"error","error-type":"unsupported-code"}"#, "RUB"),
            Err(RateError::Payload(_))
        ));
    }

    #[test]
    fn test_zero_rate_is_unusable() {
        let body = r#"{"rates":{"RUB":0}}"#;
        assert!(matches!(
            fiat_rate_from_body(body, "RUB"),
            Err(RateError::InvalidQuote { .. })
        ));
    }

    #[test]
    fn test_crypto_rate_from_body() {
        let body = r#"{"bitcoin":{"usd":64250.5}}"#;
        assert_eq!(crypto_rate_from_body(body, "bitcoin").unwrap(), 64250.5);
    }

    #[test]
    fn test_crypto_rate_missing() {
        assert!(matches!(
            crypto_rate_from_body("{}", "tron"),
            Err(RateError::MissingQuote { .. })
        ));
        assert!(matches!(
            crypto_rate_from_body(r#"{"tron":{"eur":0.1}}"#, "tron"),
            Err(RateError::MissingQuote { .. })
        ));
        assert!(matches!(
            crypto_rate_from_body(r#"{"status":{"error_message":"rate limited"}}"#, "tron"),
            Err(RateError::Payload(_))
        ));
    }

    #[test]
    fn test_fiat_url() {
        let client = client_for("https://rates.example.com/v4/latest");
        assert_eq!(
            client.fiat_url("EUR").unwrap().as_str(),
            "https://rates.example.com/v4/latest/EUR"
        );

        let client = client_for("https://rates.example.com/v4/latest/");
        assert_eq!(
            client.fiat_url("EUR").unwrap().as_str(),
            "https://rates.example.com/v4/latest/EUR"
        );
    }

    #[test]
    fn test_fiat_url_escapes_user_input() {
        let client = client_for("https://rates.example.com/v4/latest");
        let url = client.fiat_url("../../admin?x=1").unwrap();
        assert_eq!(url.host_str(), Some("rates.example.com"));
        assert!(url.path().starts_with("/v4/latest/"));
        assert_eq!(url.query(), None);
    }
}
