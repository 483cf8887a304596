#[tokio::main]
async fn main() {
    if let Err(err) = follower_gateway::run().await {
        tracing::error!("fatal: {}", err);
        eprintln!("{err}");
        std::process::exit(1);
    }
}
