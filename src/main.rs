#[tokio::main]
async fn main() -> std::io::Result<()> {
    shooting_gallery::run_with_config().await
}
