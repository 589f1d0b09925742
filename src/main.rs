#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    barbershop_backend::run().await;
}
