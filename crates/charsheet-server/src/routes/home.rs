use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::cookies::{get_cookie, set_cookie};
use crate::routes::page;
use crate::state::AppState;

/// GET / — greet the logged-in user's character, or bounce them through the
/// OAuth login with a `redir` cookie pointing back here.
pub async fn home(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let user_id = get_cookie(&headers, "user_id").and_then(|v| v.parse::<u64>().ok());
    let Some(user_id) = user_id else {
        let redirect = Redirect::to(&app.ctx.config.web.oauth_authorize_url);
        return ([set_cookie("redir", "/")], redirect).into_response();
    };

    let name = match app.ctx.character(user_id).await {
        Ok(character) => character.name,
        Err(_) => "Unknown".to_string(),
    };
    let body = format!(
        "<h1>Welcome back, {name}!</h1>\n\
         <p>Your character sheet is linked and ready.</p>\n\
         <p class=\"muted\"><a href=\"/logout\">Log out</a></p>"
    );
    Html(page("Character Sheet Companion", &body)).into_response()
}
