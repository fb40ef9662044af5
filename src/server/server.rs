use anyhow::Result;
use std::time::{Duration, Instant};

use tracing::error;

use crate::user::auth::{AuthToken, AuthTokenValue};
use crate::user::ThemePreference;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tower_http::services::ServeDir;

use axum::{
    body::Body,
    extract::State,
    http::{header, response, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::metrics::record_login_attempt;
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::{log_requests, make_catalog_routes, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub user_handle: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    token: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct ThemeBody {
    pub theme: ThemePreference,
}

async fn home(
    session: Option<Session>,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

async fn login(
    State(user_store): State<SharedUserStore>,
    Json(body): Json<LoginBody>,
) -> Response {
    let credentials = match user_store.get_password_credentials(&body.user_handle) {
        Some(credentials) => credentials,
        None => {
            record_login_attempt(false);
            return StatusCode::FORBIDDEN.into_response();
        }
    };

    match credentials.verify(&body.password) {
        Ok(true) => {}
        _ => {
            record_login_attempt(false);
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    let token = AuthToken::new(credentials.user_id);
    if let Err(err) = user_store.add_auth_token(&token) {
        error!("Failed to persist auth token: {}", err);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    record_login_attempt(true);

    let response_body = LoginSuccessResponse {
        token: token.value.0.clone(),
    };
    let response_body = serde_json::to_string(&response_body).unwrap();

    let cookie_value = HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly",
        COOKIE_SESSION_TOKEN_KEY, token.value.0
    ))
    .unwrap();
    response::Builder::new()
        .status(StatusCode::CREATED)
        .header(header::SET_COOKIE, cookie_value)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(response_body))
        .unwrap()
}

async fn logout(
    State(user_store): State<SharedUserStore>,
    session: Session,
) -> Response {
    match user_store.delete_auth_token(&AuthTokenValue(session.token)) {
        Ok(true) => {
            let cookie_value = Cookie::build(Cookie::new(COOKIE_SESSION_TOKEN_KEY, ""))
                .path("/")
                .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1)) // Expire it in the past
                .same_site(SameSite::Lax)
                .build();

            response::Builder::new()
                .status(StatusCode::OK)
                .header(header::SET_COOKIE, cookie_value.to_string())
                .body(Body::empty())
                .unwrap()
        }
        Ok(false) => StatusCode::BAD_REQUEST.into_response(),
        Err(err) => {
            error!("Failed to delete auth token: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_theme(
    session: Session,
    State(user_store): State<SharedUserStore>,
) -> Response {
    // Absence (never set, or unreadable) falls back to the default theme.
    let theme = user_store.get_theme(session.user_id).unwrap_or_default();
    Json(ThemeBody { theme }).into_response()
}

async fn put_theme(
    session: Session,
    State(user_store): State<SharedUserStore>,
    Json(body): Json<ThemeBody>,
) -> Response {
    match user_store.set_theme(session.user_id, body.theme) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            error!("Failed to store theme: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

impl ServerState {
    fn new(config: ServerConfig, catalog: SharedCatalog, user_store: SharedUserStore) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            user_store,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog: SharedCatalog,
    user_store: SharedUserStore,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog, user_store);

    let auth_routes: Router = Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .with_state(state.clone());

    let catalog_routes = make_catalog_routes(state.clone());

    let user_routes: Router = Router::new()
        .route("/theme", get(get_theme))
        .route("/theme", put(put_theme))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .nest("/v1/auth", auth_routes)
        .nest("/v1/catalog", catalog_routes)
        .nest("/v1/user", user_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(
    catalog: SharedCatalog,
    user_store: SharedUserStore,
    requests_logging_level: super::RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, catalog, user_store)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
