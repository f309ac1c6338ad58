use super::*;

pub(super) fn build_router(state: Arc<AppState>) -> Router {
    let documents = Router::new()
        .route("/drive/v3/files", get(list_files))
        .route("/drive/v3/files/:id", get(get_file))
        .route("/upload/drive/v3/files", post(create_file))
        .route("/upload/drive/v3/files/:id", axum::routing::patch(update_file))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/chat", post(chat).fallback(method_not_allowed))
        .merge(documents)
        .with_state(state)
}
