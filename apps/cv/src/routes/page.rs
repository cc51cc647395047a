use axum::{
    extract::{Query, State},
    http::{
        header::{HeaderName, VARY},
        HeaderMap,
    },
    response::{Html, IntoResponse},
};

use crate::errors::AppError;
use crate::loader::ProfileLoader;
use crate::render::{compose, Theme, ThemeContext};
use crate::state::AppState;

/// Client hint carrying the browser's `prefers-color-scheme`.
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";
const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");

/// First valid `theme` parameter, if any. Repeated or unknown values
/// never reject the request.
fn requested_theme(params: &[(String, String)]) -> Option<Theme> {
    params
        .iter()
        .filter(|(key, _)| key == "theme")
        .find_map(|(_, value)| Theme::parse(value))
}

/// GET /
///
/// One page load: one profile fetch, then compose and render. Fetch failures
/// and empty results render as an error banner, not an HTTP error.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let mut loader = ProfileLoader::new();
    // Fires if the client goes away mid-fetch and this future is dropped.
    let _teardown = loader.cancellation().drop_guard();
    loader.load(state.profiles.as_ref()).await;

    let mut doc = compose(loader.state());

    let hint = headers
        .get(PREFERS_COLOR_SCHEME)
        .and_then(|v| v.to_str().ok());
    let mut theme = ThemeContext::from_system_preference(hint);
    if let Some(requested) = requested_theme(&params) {
        if requested != theme.theme() {
            theme.toggle();
        }
    }
    theme.apply(&mut doc);

    let html = state.renderer.render(&doc)?;

    Ok((
        [
            (ACCEPT_CH, "Sec-CH-Prefers-Color-Scheme"),
            (VARY, "Sec-CH-Prefers-Color-Scheme"),
        ],
        Html(html),
    ))
}
