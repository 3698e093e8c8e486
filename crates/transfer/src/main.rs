#[tokio::main]
async fn main() {
    transfer::start(std::env::args()).await;
}
