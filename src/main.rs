use timecard::commands::Cli;
use timecard::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "timecard=debug".into()),
            ))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Cli::menu().await
}
