use std::sync::Arc;

use teloxide::prelude::{Bot, Message, ResponseResult};
use teloxide::types::{ChatId, Me};
use teloxide::utils::command::BotCommands;
use wlchecker_format::Dialect;

use crate::Config;
use crate::command::Command;
use crate::config::MessageLimits;
use crate::convert::from_telegram_entities;
use crate::rate_limit::RateLimiters;
use crate::response;
use crate::send::send_long_message;

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    me: Me,
    config: Arc<Config>,
    rate_limiters: Arc<RateLimiters>,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let Some(text) = msg.text() else {
        return Ok(());
    };

    if !rate_limiters.allow_command(user_id) {
        tracing::info!(user_id, "command rate limited");
        reply(&bot, chat_id, &response::slow_down(), Dialect::Html, &config.limits).await;
        return Ok(());
    }

    let is_admin = config.is_admin(user_id, user.username.as_deref());

    let response = match BotCommands::parse(text, me.username()) {
        Ok(cmd) => match cmd {
            Command::Help => response::help(),
            Command::Start => response::start(user_id, &user.full_name()),

            Command::Html(_) | Command::Markdown(_) | Command::Source if !is_admin => {
                tracing::info!(user_id, "admin command rejected");
                response::no_permission()
            }

            Command::Html(markup) if markup.trim().is_empty() => response::render_usage("html"),
            Command::Html(markup) => {
                tracing::info!(user_id, "rendering html markup");
                reply(&bot, chat_id, &markup, Dialect::Html, &config.limits).await;
                return Ok(());
            }

            Command::Markdown(markup) if markup.trim().is_empty() => {
                response::render_usage("markdown")
            }
            Command::Markdown(markup) => {
                tracing::info!(user_id, "rendering markdown markup");
                reply(&bot, chat_id, &markup, Dialect::Markdown, &config.limits).await;
                return Ok(());
            }

            Command::Source => match msg.reply_to_message().and_then(|replied| {
                replied
                    .text()
                    .map(|text| (text, replied.entities().unwrap_or_default()))
            }) {
                Some((text, entities)) => response::source(text, &from_telegram_entities(entities)),
                None => response::source_usage(),
            },
        },
        Err(_) => response::unknown_command(),
    };

    reply(&bot, chat_id, &response, Dialect::Html, &config.limits).await;

    Ok(())
}

async fn reply(
    bot: &Bot,
    chat_id: ChatId,
    markup: &str,
    dialect: Dialect,
    limits: &MessageLimits,
) {
    let Err(error) = send_long_message(bot, chat_id, markup, dialect, limits).await else {
        return;
    };
    tracing::error!(%error, %chat_id, "Failed to send reply");

    // invalid limits in the config, retry with the defaults
    let fallback = response::internal_server_error();
    let limits = MessageLimits::default();
    if let Err(error) = send_long_message(bot, chat_id, &fallback, Dialect::Html, &limits).await {
        tracing::error!(%error, %chat_id, "Failed to report error");
    }
}
