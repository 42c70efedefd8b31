//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::GetRoomMembersUseCase;

use super::{
    handler::{
        http::{debug_rooms, health_check},
        websocket::websocket_handler,
    },
    router::SessionRouter,
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(session_router, get_room_members_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// SessionRouter（セッションごとのイベント処理）
    router: Arc<SessionRouter>,
    /// GetRoomMembersUseCase（所属状況取得のユースケース）
    get_room_members_usecase: Arc<GetRoomMembersUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        router: Arc<SessionRouter>,
        get_room_members_usecase: Arc<GetRoomMembersUseCase>,
    ) -> Self {
        Self {
            router,
            get_room_members_usecase,
        }
    }

    /// Build the axum application
    pub fn into_app(self) -> Router {
        let app_state = Arc::new(AppState {
            router: self.router,
            get_room_members_usecase: self.get_room_members_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(debug_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_app();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
