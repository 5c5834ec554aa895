use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = finance_tracker::args::parse();
    finance_tracker::cli::main(args).await
}
