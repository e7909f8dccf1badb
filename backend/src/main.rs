#[tokio::main]
async fn main() {
    travel_book::start_server().await;
}
