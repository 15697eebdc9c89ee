use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{api::router::ApiRoutes, app_state::SharedAppState};

pub async fn setup_http_server(
    app_state: SharedAppState,
    bind_address: &str,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let app = ApiRoutes::create(app_state.clone()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("API server listening on {}", listener.local_addr()?);

    let stop_flag = app_state.stop_flag.clone();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_flag.wait().await;
                info!("Stop flag was set, shutting down HTTP server gracefully");
            })
            .await?;
        info!("HTTP server is down");
        Ok(())
    });

    Ok(handle)
}
