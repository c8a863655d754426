mod docs;
mod error;
mod info;
mod router;
mod state;
mod token_info;
mod transfer;

use std::env;

use dotenvy::dotenv;
use router::router;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let server_domain = env::var("SERVER_DOMAIN").unwrap_or("127.0.0.1:3200".to_string());

    let app = router().await;

    let listener = tokio::net::TcpListener::bind(&server_domain).await.unwrap();

    tracing::info!(%server_domain, "bijlee dashboard backend listening");

    axum::serve(listener, app).await.unwrap();
}
