/// Валюта для быстрого курса к рублю
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fiat {
    Usd,
    Eur,
    Gbp,
}

impl Fiat {
    pub const ALL: [Fiat; 3] = [Fiat::Usd, Fiat::Eur, Fiat::Gbp];

    pub fn code(self) -> &'static str {
        match self {
            Fiat::Usd => "USD",
            Fiat::Eur => "EUR",
            Fiat::Gbp => "GBP",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Fiat::Usd => "usd",
            Fiat::Eur => "eur",
            Fiat::Gbp => "gbp",
        }
    }
}

/// 10 популярных криптовалют
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Btc,
    Eth,
    Bnb,
    Xrp,
    Sol,
    Ada,
    Doge,
    Dot,
    Trx,
    Link,
}

impl Coin {
    pub const ALL: [Coin; 10] = [
        Coin::Btc,
        Coin::Eth,
        Coin::Bnb,
        Coin::Xrp,
        Coin::Sol,
        Coin::Ada,
        Coin::Doge,
        Coin::Dot,
        Coin::Trx,
        Coin::Link,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Coin::Btc => "btc",
            Coin::Eth => "eth",
            Coin::Bnb => "bnb",
            Coin::Xrp => "xrp",
            Coin::Sol => "sol",
            Coin::Ada => "ada",
            Coin::Doge => "doge",
            Coin::Dot => "dot",
            Coin::Trx => "trx",
            Coin::Link => "link",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Coin::Btc => "BTC",
            Coin::Eth => "ETH",
            Coin::Bnb => "BNB",
            Coin::Xrp => "XRP",
            Coin::Sol => "SOL",
            Coin::Ada => "ADA",
            Coin::Doge => "DOGE",
            Coin::Dot => "DOT",
            Coin::Trx => "TRX",
            Coin::Link => "LINK",
        }
    }

    /// Идентификатор монеты у провайдера цен
    pub fn provider_id(self) -> &'static str {
        match self {
            Coin::Btc => "bitcoin",
            Coin::Eth => "ethereum",
            Coin::Bnb => "binancecoin",
            Coin::Xrp => "ripple",
            Coin::Sol => "solana",
            Coin::Ada => "cardano",
            Coin::Doge => "dogecoin",
            Coin::Dot => "polkadot",
            Coin::Trx => "tron",
            Coin::Link => "chainlink",
        }
    }
}

/// Действие, привязанное к кнопке inline-меню.
///
/// Токен действия передаётся в `callback_data` и обратно разбирается
/// через [`MenuAction::from_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Main,
    Currency,
    Crypto,
    Converter,
    Fiat(Fiat),
    Coin(Coin),
}

impl MenuAction {
    pub fn token(self) -> &'static str {
        match self {
            MenuAction::Main => "main",
            MenuAction::Currency => "currency",
            MenuAction::Crypto => "crypto",
            MenuAction::Converter => "converter",
            MenuAction::Fiat(fiat) => fiat.token(),
            MenuAction::Coin(coin) => coin.token(),
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "main" => Some(MenuAction::Main),
            "currency" => Some(MenuAction::Currency),
            "crypto" => Some(MenuAction::Crypto),
            "converter" => Some(MenuAction::Converter),
            _ => Fiat::ALL
                .into_iter()
                .find(|fiat| fiat.token() == token)
                .map(MenuAction::Fiat)
                .or_else(|| {
                    Coin::ALL
                        .into_iter()
                        .find(|coin| coin.token() == token)
                        .map(MenuAction::Coin)
                }),
        }
    }
}
