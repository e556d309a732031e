use anyhow::{Context, Result};
use reqwest::Url;

const FIAT_RATES_URL_ENV: &str = "FIAT_RATES_URL";
const CRYPTO_PRICES_URL_ENV: &str = "CRYPTO_PRICES_URL";

const DEFAULT_FIAT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";
const DEFAULT_CRYPTO_PRICES_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Адреса провайдеров курсов. Токен бота teloxide читает сам (`TELOXIDE_TOKEN`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub fiat_rates_url: Url,
    pub crypto_prices_url: Url,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            fiat_rates_url: url_setting(&lookup, FIAT_RATES_URL_ENV, DEFAULT_FIAT_RATES_URL)?,
            crypto_prices_url: url_setting(&lookup, CRYPTO_PRICES_URL_ENV, DEFAULT_CRYPTO_PRICES_URL)?,
        })
    }
}

fn url_setting(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<Url> {
    let raw = lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    let url = Url::parse(raw.trim()).with_context(|| format!("{key} is not a valid URL: {raw}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("{key} must be an http(s) URL: {raw}");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.fiat_rates_url.as_str(), DEFAULT_FIAT_RATES_URL);
        assert_eq!(settings.crypto_prices_url.as_str(), DEFAULT_CRYPTO_PRICES_URL);
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            (FIAT_RATES_URL_ENV, "http://localhost:8080/latest"),
            (CRYPTO_PRICES_URL_ENV, " http://localhost:8081/price "),
        ])
        .unwrap();
        assert_eq!(settings.fiat_rates_url.as_str(), "http://localhost:8080/latest");
        assert_eq!(settings.crypto_prices_url.as_str(), "http://localhost:8081/price");
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let settings = settings(&[(FIAT_RATES_URL_ENV, "  ")]).unwrap();
        assert_eq!(settings.fiat_rates_url.as_str(), DEFAULT_FIAT_RATES_URL);
    }

    #[test]
    fn test_invalid_url() {
        let err = settings(&[(CRYPTO_PRICES_URL_ENV, "not a url")]).unwrap_err();
        assert!(err.to_string().contains(CRYPTO_PRICES_URL_ENV));

        let err = settings(&[(FIAT_RATES_URL_ENV, "mailto:rates@example.com")]).unwrap_err();
        assert!(err.to_string().contains(FIAT_RATES_URL_ENV));
    }
}
