use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod config;
mod handlers;
mod models;
mod rates;

use crate::bot_state::BotState;
use crate::config::Settings;
use crate::handlers::{callback_handler, command_handler, message_handler};
use crate::rates::HttpRateClient;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
enum Command {
    #[command(description = "главное меню")]
    Start,
    #[command(description = "показать помощь")]
    Help,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting exchange rates bot...");

    let settings = Settings::from_env()?;
    log::info!(
        "✅ Rate providers: fiat {}, crypto {}",
        settings.fiat_rates_url,
        settings.crypto_prices_url
    );

    let state = BotState::new(Arc::new(HttpRateClient::new(&settings)));

    let bot = Bot::from_env();
    bot.set_my_commands(Command::bot_commands()).await?;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler)
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
