//! Логика диалога без привязки к Telegram API.
//!
//! Каждое входящее событие (команда `/start`, нажатие кнопки, текст)
//! превращается в список [`Reply`], которые затем отправляет
//! [`send_replies`](crate::handlers::utils::send_replies).

use teloxide::types::UserId;

use crate::bot_state::BotState;
use crate::handlers::utils::{escape_markdown_v2, Screen};
use crate::models::{Coin, ConversionRequest, Fiat, MenuAction, SessionState, SUPPORTED_CODES};

const DEFAULT_NAME: &str = "пользователь";
const QUOTE_TARGET: &str = "RUB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Новое сообщение
    Send,
    /// Правка сообщения, на котором нажата кнопка
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
    pub screen: Option<Screen>,
    /// Текст уже размечен в MarkdownV2
    pub markdown: bool,
}

impl Reply {
    pub fn send(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Send,
            text: text.into(),
            screen: None,
            markdown: false,
        }
    }

    pub fn edit(text: impl Into<String>, screen: Screen) -> Self {
        Self {
            kind: ReplyKind::Edit,
            text: text.into(),
            screen: Some(screen),
            markdown: false,
        }
    }

    pub fn with_menu(mut self, screen: Screen) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }
}

/// `/start`: приветствие и главное меню
pub fn on_start(user_id: UserId, display_name: Option<&str>) -> Vec<Reply> {
    let name = display_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_NAME);
    log::info!("👋 /start from user {}", user_id.0);

    vec![Reply::send(format!("👋 Привет, {name}!\n\nВыберите категорию:")).with_menu(Screen::Main)]
}

/// `/help`: краткая справка и главное меню
pub fn on_help() -> Vec<Reply> {
    let text = "ℹ️ Я показываю курсы валют и криптовалют и конвертирую суммы.\n\n\
        /start – главное меню\n\
        /help – эта справка\n\n\
        Для конвертации откройте «🔄 Конвертор» и отправьте сообщение вида 100 USD to RUB";

    vec![Reply::send(text).with_menu(Screen::Main)]
}

/// Нажатие inline-кнопки
pub async fn on_button(state: &BotState, user_id: UserId, token: &str) -> Vec<Reply> {
    let Some(action) = MenuAction::from_token(token) else {
        log::warn!("⚠️ Unknown callback data {:?} from user {}", token, user_id.0);
        return Vec::new();
    };

    match action {
        MenuAction::Main => vec![Reply::edit("Выберите категорию:", Screen::Main)],
        MenuAction::Currency => vec![Reply::edit("Выберите валюту:", Screen::Currency)],
        MenuAction::Crypto => vec![Reply::edit("Выберите криптовалюту:", Screen::Crypto)],
        MenuAction::Converter => {
            state.set_session_state(user_id, SessionState::AwaitingConversion).await;
            vec![Reply::edit(converter_hint(), Screen::Converter).markdown()]
        }
        MenuAction::Fiat(fiat) => vec![fiat_quote(state, fiat).await],
        MenuAction::Coin(coin) => vec![crypto_quote(state, coin).await],
    }
}

/// Текстовое сообщение (не команда)
pub async fn on_text(state: &BotState, user_id: UserId, text: &str) -> Vec<Reply> {
    if state.session_state(user_id).await != SessionState::AwaitingConversion {
        return vec![Reply::send(
            "⚠️ Неверный формат. Пожалуйста, выберите опцию из меню или введите корректную команду.",
        )];
    }

    let Ok(request) = text.parse::<ConversionRequest>() else {
        return vec![format_error()];
    };

    let rate = match state.rates().fiat_rate(&request.base, &request.target).await {
        Ok(rate) => rate,
        Err(e) => {
            log::warn!("❌ Rate {} -> {} unavailable: {}", request.base, request.target, e);
            return vec![Reply::send("❌ Не удалось получить курс для этих валют.")];
        }
    };

    let Some(converted) = request.convert(rate) else {
        log::warn!("❌ Conversion overflow: {} {} at rate {}", request.amount, request.base, rate);
        return vec![format_error()];
    };

    state.clear_session_state(user_id).await;
    log::info!(
        "🔁 User {} converted {} {} -> {} {}",
        user_id.0,
        request.amount,
        request.base,
        converted,
        request.target
    );

    vec![
        Reply::send(format!(
            "🔁 {} {} = {:.2} {}",
            request.amount.normalize(),
            request.base,
            converted,
            request.target
        )),
        Reply::send("Выберите, что вы хотите сделать далее:").with_menu(Screen::Main),
    ]
}

async fn fiat_quote(state: &BotState, fiat: Fiat) -> Reply {
    let text = match state.rates().fiat_rate(fiat.code(), QUOTE_TARGET).await {
        Ok(rate) => {
            log::info!("💵 {} -> {} = {}", fiat.code(), QUOTE_TARGET, rate);
            format!("💵 1 {} = {} {}", fiat.code(), rate, QUOTE_TARGET)
        }
        Err(e) => {
            log::warn!("❌ Rate {} -> {} unavailable: {}", fiat.code(), QUOTE_TARGET, e);
            format!("❌ Не удалось получить курс {}", fiat.code())
        }
    };

    Reply::edit(text, Screen::Currency)
}

async fn crypto_quote(state: &BotState, coin: Coin) -> Reply {
    let text = match state.rates().crypto_rate(coin).await {
        Ok(price) => {
            log::info!("💸 {} = {} USD", coin.symbol(), price);
            format!("💸 1 {} = {} USD", coin.symbol(), price)
        }
        Err(e) => {
            log::warn!("❌ Price of {} unavailable: {}", coin.provider_id(), e);
            format!("❌ Не удалось получить курс {}", coin.symbol())
        }
    };

    Reply::edit(text, Screen::Crypto)
}

fn converter_hint() -> String {
    format!(
        "{}\n`100 USD to RUB`\n{}",
        escape_markdown_v2("✏️ Введите сумму и валюты в формате, например:"),
        escape_markdown_v2(&format!("(поддерживаемые валюты {})", SUPPORTED_CODES.join(", ")))
    )
}

fn format_error() -> Reply {
    Reply::send(format!(
        "{}\n`100 USD to RUB`",
        escape_markdown_v2("⚠️ Неверный формат. Пример:")
    ))
    .markdown()
}
