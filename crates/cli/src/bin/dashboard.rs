use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dashboard_cli::main_entry().await
}
