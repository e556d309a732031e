use teloxide::prelude::*;
use std::error::Error;

use crate::bot_state::BotState;
use crate::handlers::interaction::on_button;
use crate::handlers::utils::send_replies;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Убираем «часики» на кнопке
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        log::warn!("Callback {:?} from user {} without message", data, q.from.id.0);
        return Ok(());
    };

    let replies = on_button(&state, q.from.id, data).await;
    send_replies(&bot, message.chat().id, Some(message.id()), replies).await?;

    Ok(())
}
