use serde::Deserialize;
use std::collections::HashMap;

/// Ответ `GET {FIAT_RATES_URL}/{BASE}`
#[derive(Clone, Debug, Deserialize)]
pub struct FiatRatesResponse {
    pub rates: HashMap<String, f64>,
}

/// Ответ `GET {CRYPTO_PRICES_URL}?ids=...&vs_currencies=usd`: `{"bitcoin": {"usd": 64000.0}}`
pub type CryptoPricesResponse = HashMap<String, HashMap<String, f64>>;

pub const CRYPTO_VS_CURRENCY: &str = "usd";
