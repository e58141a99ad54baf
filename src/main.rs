#[tokio::main]
async fn main() {
    hscode::start_server().await;
}
