use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    codecracker_cli::main_entry().await
}
