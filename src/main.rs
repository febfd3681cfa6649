#[tokio::main]
async fn main() {
    citamed::run().await
}
