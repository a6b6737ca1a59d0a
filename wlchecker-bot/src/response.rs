//! Replies of the bot, all rendered as HTML markup.

use teloxide::utils::command::BotCommands;
use wlchecker_format::{Entity, RichText, html, markdown};

use crate::command::Command;

pub fn start(user_id: i64, name: &str) -> String {
    let mut msg = RichText::html();
    let mention = msg.mention(name, user_id);
    let greeting = msg.bold(mention);
    let help = msg.code("/help");

    msg.text("👋 Hello, ")
        .text(greeting)
        .text("! Send me HTML or Markdown and I will render it as a Telegram message.")
        .newline()
        .text("Run ")
        .text(help)
        .text(" to see the available commands.");
    msg.build()
}

pub fn help() -> String {
    let mut msg = RichText::html();
    msg.text(Command::descriptions().to_string());
    msg.build()
}

/// HTML and Markdown source of a formatted message.
pub fn source(text: &str, entities: &[Entity]) -> String {
    let mut msg = RichText::html();
    let html_title = msg.bold("HTML");
    let html_source = msg.pre(html::unparse(text, entities), Some("html"));
    let markdown_title = msg.bold("Markdown");
    let markdown_source = msg.pre(markdown::unparse(text, entities), Some("markdown"));

    msg.text(html_title)
        .newline()
        .text(html_source)
        .newline()
        .text(markdown_title)
        .newline()
        .text(markdown_source);
    msg.build()
}

pub fn source_usage() -> String {
    let mut msg = RichText::html();
    let command = msg.code("/source");
    msg.text("Reply to a text message with ").text(command).text(".");
    msg.build()
}

pub fn render_usage(command: &str) -> String {
    let mut msg = RichText::html();
    let usage = msg.code(format!("/{command} <markup>"));
    msg.text("Usage: ").text(usage);
    msg.build()
}

pub fn no_permission() -> String {
    "⛔ This command is available to admins only".to_string()
}

pub fn slow_down() -> String {
    "⏳ Too many commands, please slow down".to_string()
}

pub fn unknown_command() -> String {
    "❌ Unknown command".to_string()
}

pub fn internal_server_error() -> String {
    "❌ Internal server error".to_string()
}
