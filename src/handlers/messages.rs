use teloxide::prelude::*;
use std::error::Error;

use crate::bot_state::BotState;
use crate::handlers::interaction::on_text;
use crate::handlers::utils::send_replies;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };

    // Незнакомые команды не обрабатываем
    if text.starts_with('/') {
        return Ok(());
    }

    let replies = on_text(&state, user.id, text).await;
    send_replies(&bot, msg.chat.id, None, replies).await?;

    Ok(())
}
