use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::handlers::interaction::{Reply, ReplyKind};
use crate::models::{Coin, Fiat, MenuAction};

const BACK_LABEL: &str = "⬅️ Назад";

/// Кнопка меню: подпись и действие, которое уйдёт в `callback_data`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action: MenuAction,
}

impl MenuButton {
    fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self { label: label.into(), action }
    }
}

pub type MenuLayout = Vec<Vec<MenuButton>>;

/// Экран, к которому относится inline-меню
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Currency,
    Crypto,
    Converter,
}

impl Screen {
    pub fn layout(self) -> MenuLayout {
        match self {
            Screen::Main => main_menu(),
            Screen::Currency => currency_menu(),
            Screen::Crypto => crypto_menu(),
            Screen::Converter => converter_menu(),
        }
    }

    pub fn keyboard(self) -> InlineKeyboardMarkup {
        make_keyboard(&self.layout())
    }
}

/// Главное меню
pub fn main_menu() -> MenuLayout {
    vec![
        vec![MenuButton::new("💰 Курс валют", MenuAction::Currency)],
        vec![MenuButton::new("🪙 Криптовалюта", MenuAction::Crypto)],
        vec![MenuButton::new("🔄 Конвертор", MenuAction::Converter)],
    ]
}

/// Подменю валют
pub fn currency_menu() -> MenuLayout {
    let mut rows: MenuLayout = Fiat::ALL
        .into_iter()
        .map(|fiat| vec![MenuButton::new(format!("{} → RUB", fiat.code()), MenuAction::Fiat(fiat))])
        .collect();
    rows.push(vec![back_button()]);
    rows
}

/// Подменю криптовалют, по две монеты в ряд
pub fn crypto_menu() -> MenuLayout {
    let mut rows: MenuLayout = Coin::ALL
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|coin| MenuButton::new(coin.symbol(), MenuAction::Coin(*coin)))
                .collect()
        })
        .collect();
    rows.push(vec![back_button()]);
    rows
}

pub fn converter_menu() -> MenuLayout {
    vec![vec![back_button()]]
}

fn back_button() -> MenuButton {
    MenuButton::new(BACK_LABEL, MenuAction::Main)
}

pub fn make_keyboard(layout: &MenuLayout) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(layout.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.token()))
            .collect::<Vec<_>>()
    }))
}

/// Экранирование MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    let specials = ['_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!'];
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if specials.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Отправка ответов в чат. `Edit` правит сообщение с нажатой кнопкой,
/// если оно недоступно, ответ уходит новым сообщением.
pub async fn send_replies(
    bot: &Bot,
    chat_id: ChatId,
    pressed_message: Option<MessageId>,
    replies: Vec<Reply>,
) -> Result<(), RequestError> {
    for reply in replies {
        match (reply.kind, pressed_message) {
            (ReplyKind::Edit, Some(message_id)) => edit_reply(bot, chat_id, message_id, reply).await?,
            _ => send_reply(bot, chat_id, reply).await?,
        }
    }
    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), RequestError> {
    let mut request = bot.send_message(chat_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(screen) = reply.screen {
        request = request.reply_markup(screen.keyboard());
    }
    request.await?;
    Ok(())
}

async fn edit_reply(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    reply: Reply,
) -> Result<(), RequestError> {
    let mut request = bot.edit_message_text(chat_id, message_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(screen) = reply.screen {
        request = request.reply_markup(screen.keyboard());
    }

    match request.await {
        Ok(_) => Ok(()),
        // Повторное нажатие той же кнопки: текст и меню не изменились
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            log::debug!("Message {} in chat {} not modified", message_id.0, chat_id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
