mod command;
mod config;
mod convert;
mod error;
mod handler;
mod rate_limit;
mod response;
mod send;

use std::sync::Arc;

pub use config::{Config, MessageLimits};
pub use convert::{
    from_telegram_entities, from_telegram_entity, to_telegram_entities, to_telegram_entity,
};
pub use error::*;
pub use send::{ChunkSender, send_long_message};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::Requester;
use teloxide::utils::command::BotCommands;

use crate::command::Command;
use crate::rate_limit::RateLimiters;

pub struct WlCheckerBot {
    bot: teloxide::prelude::Bot,
    config: Arc<Config>,
}

impl WlCheckerBot {
    pub fn new(config: &Config) -> Self {
        let bot = teloxide::prelude::Bot::new(&config.token);
        Self {
            bot,
            config: Arc::new(config.clone()),
        }
    }

    pub async fn run(self) -> BotResult<()> {
        tracing::info!("Starting Telegram bot...");

        self.bot.set_my_commands(Command::bot_commands()).await?;

        let handler = teloxide::prelude::Update::filter_message().endpoint(handler::handle_command);

        let rate_limiters = Arc::new(RateLimiters::new());

        teloxide::prelude::Dispatcher::builder(self.bot, handler)
            .dependencies(teloxide::prelude::dptree::deps![
                self.config,
                rate_limiters
            ])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
