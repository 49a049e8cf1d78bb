use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;

/// Serve `status` and `body` for every request on an ephemeral local port.
/// Returns the base URL.
pub async fn serve_canned(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().fallback(move || async move { (status, body) });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}
