use teloxide::utils::command::BotCommands;

#[derive(BotCommands)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub(crate) enum Command {
    #[command(description = "Show this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Render HTML markup: /html <b>text</b>")]
    Html(String),
    #[command(description = "Render Markdown markup: /markdown **text**")]
    Markdown(String),
    #[command(description = "Reply to a message to see its HTML and Markdown source")]
    Source,
}
