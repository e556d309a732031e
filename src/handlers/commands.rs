use teloxide::prelude::*;
use std::error::Error;

use crate::handlers::interaction::{on_help, on_start};
use crate::handlers::utils::send_replies;
use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Посты каналов приходят без автора
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let replies = match cmd {
        Command::Start => on_start(user.id, Some(user.first_name.as_str())),
        Command::Help => on_help(),
    };

    send_replies(&bot, msg.chat.id, None, replies).await?;
    Ok(())
}
