//! Count command implementation.

use std::sync::Arc;

use loyalty_widgets_core::Config;

use crate::ui::ConsoleLabel;

/// Fetch the record count for `query` into a console label.
pub async fn run_count(config: &Config, query: &str) -> anyhow::Result<()> {
    let fetcher = config.count_fetcher()?;
    tracing::info!("count widget bound to {}", fetcher.page_url());

    println!("\x1b[1mEndpoint:\x1b[0m {}", fetcher.endpoint(query)?);

    let label = Arc::new(ConsoleLabel::new("count"));
    fetcher.spawn_fetch_count(label.clone(), query).await?;

    println!("\n{}", label.text());
    Ok(())
}
