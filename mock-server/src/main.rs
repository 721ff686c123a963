use tokio::net::TcpListener;

/// Serves every role's fixtures on one port, `PORT` or 8088.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "8088".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock yarn listening on {addr}");
    mock_server::run(listener).await
}
