use anyhow::Result;
use ftchat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
