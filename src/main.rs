mod config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::Config::new();

    tracing::info!(
        admins = config.bot.admins.len(),
        max_length = config.bot.limits.max_length,
        max_entities = config.bot.limits.max_entities,
        "starting service"
    );

    let bot = wlchecker_bot::WlCheckerBot::new(&config.bot);
    if let Err(error) = bot.run().await {
        tracing::error!(%error, "bot stopped");
    }
}
