#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campus_match_lib::run().await
}
