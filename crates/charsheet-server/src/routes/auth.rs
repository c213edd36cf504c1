use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::cookies::{clear_cookie, get_cookie, set_cookie};
use crate::error::AppError;
use crate::routes::page;
use crate::state::AppState;

/// GET /authorise — send the browser to the configured OAuth page.
pub async fn authorise(State(app): State<AppState>) -> Redirect {
    Redirect::to(&app.ctx.config.web.oauth_authorize_url)
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Identity {
    id: String,
}

/// GET /callback — exchange the authorization code for a token, resolve the
/// user id, and set the login cookie.
pub async fn callback(
    State(app): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let web = &app.ctx.config.web;
    let Some(code) = query.code else {
        let body = format!(
            "<h1>Invalid Access Code!</h1>\n\
             <p>To login, go to <a href=\"{}/authorise\">the OAuth page</a>!</p>",
            web.root_url
        );
        return Ok(Html(page("Login failed", &body)).into_response());
    };
    tracing::debug!("exchanging OAuth code");

    let http = reqwest::Client::new();
    let token: TokenResponse = http
        .post(&web.oauth_token_url)
        .form(&[
            ("client_id", web.oauth_client_id.as_str()),
            ("client_secret", web.oauth_client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", &format!("{}/callback", web.root_url)),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let identity: Identity = http
        .get(&web.oauth_identity_url)
        .bearer_auth(&token.access_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    tracing::debug!(user = %identity.id, "user authorised");

    let redir = get_cookie(&headers, "redir").unwrap_or_else(|| "/".to_string());
    let redirect = Redirect::to(&redir);
    Ok(([set_cookie("user_id", &identity.id)], redirect).into_response())
}

/// GET /logout — clear the login cookie.
pub async fn logout() -> Response {
    let body = "<h1>Logged out</h1>\n\
                <p>See you next session. <a href=\"/\">Log back in</a></p>";
    (
        [clear_cookie("user_id")],
        Html(page("Logged out", body)),
    )
        .into_response()
}
