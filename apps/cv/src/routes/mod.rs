pub mod health;
pub mod page;

use axum::{routing::get, Router};
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Local fallback avatar, relative to the assets directory.
const AVATAR_FILE: &str = "avatar.jpg";

pub fn build_router(state: AppState) -> Router {
    let avatar = ServeFile::new(state.config.assets_dir.join(AVATAR_FILE));

    Router::new()
        .route("/", get(page::page_handler))
        .route("/health", get(health::health_handler))
        .route_service("/avatar.jpg", avatar)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::loader::tests::FakeSource;
    use crate::loader::LoadError;
    use crate::models::profile::Profile;
    use crate::render::PageRenderer;

    fn config(assets_dir: &Path) -> Config {
        Config {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "anon".to_string(),
            profile_table: "perfil".to_string(),
            port: 3000,
            assets_dir: assets_dir.to_path_buf(),
            fetch_timeout: Duration::from_secs(1),
            rust_log: "info".to_string(),
        }
    }

    fn app(source: Arc<FakeSource>, assets_dir: &Path) -> Router {
        build_router(AppState {
            config: config(assets_dir),
            profiles: source,
            renderer: Arc::new(PageRenderer::new().unwrap()),
        })
    }

    fn profile() -> Profile {
        Profile {
            id: "1".to_string(),
            full_name: "Ana Gómez".to_string(),
            ..Profile::default()
        }
    }

    async fn get(app: Router, uri: &str, hint: Option<&str>) -> (StatusCode, String) {
        let mut req = Request::builder().uri(uri);
        if let Some(hint) = hint {
            req = req.header(page::PREFERS_COLOR_SCHEME, hint);
        }
        let resp = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_health_is_fixed_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(app(Arc::new(FakeSource::empty()), dir.path()), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Backend OK");
    }

    #[tokio::test]
    async fn test_page_renders_profile_with_one_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::with(profile()));
        let (status, body) = get(app(source.clone(), dir.path()), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ana Gómez"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_store_renders_no_data_banner() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(app(Arc::new(FakeSource::empty()), dir.path()), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(LoadError::NoData.message()));
    }

    #[tokio::test]
    async fn test_failing_store_renders_generic_banner() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(app(Arc::new(FakeSource::failing()), dir.path()), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(LoadError::LoadFailed.message()));
        assert!(!body.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_theme_seeded_from_client_hint() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::with(profile()));
        let (_, body) = get(app(source.clone(), dir.path()), "/", Some("dark")).await;
        assert!(body.contains("data-theme=\"dark\">"));
        let (_, body) = get(app(source, dir.path()), "/", None).await;
        assert!(body.contains("data-theme=\"light\">"));
    }

    #[tokio::test]
    async fn test_theme_query_overrides_preference() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::with(profile()));
        let (_, body) = get(app(source.clone(), dir.path()), "/?theme=light", Some("dark")).await;
        assert!(body.contains("data-theme=\"light\">"));
        let (_, body) = get(app(source, dir.path()), "/?theme=bogus", Some("dark")).await;
        assert!(body.contains("data-theme=\"dark\">"));
    }

    #[tokio::test]
    async fn test_repeated_theme_param_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::with(profile()));
        let (status, body) =
            get(app(source, dir.path()), "/?theme=dark&theme=light", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-theme=\"dark\">"));
    }

    #[tokio::test]
    async fn test_avatar_served_from_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("avatar.jpg"), b"jpeg-bytes").unwrap();
        let (status, body) = get(app(Arc::new(FakeSource::empty()), dir.path()), "/avatar.jpg", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "jpeg-bytes");
    }

    #[tokio::test]
    async fn test_missing_avatar_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = get(app(Arc::new(FakeSource::empty()), dir.path()), "/avatar.jpg", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
