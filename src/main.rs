#[tokio::main]
async fn main() -> anyhow::Result<()> {
    user_prediction::server::run().await
}
