use axum::{debug_handler, extract::State, response::Redirect, routing::get, Router};
use papajobs::{auth, booking, chat, config::Config, gateway::Gateway, home, jobs, meets, profile, reviews, session, AppResult, AppState};
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(30)));

    let gateway = Gateway::new(config.api_url.clone());
    let addr = config.addr.clone();
    let app_state = AppState { config, gateway };

    let app = Router::new()
        .route("/", get(index))
        .route("/home", get(home::home))
        .merge(auth::router())
        .merge(jobs::router())
        .merge(booking::router())
        .merge(meets::router())
        .merge(reviews::router())
        .merge(profile::router())
        .merge(chat::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(CorsLayer::permissive());

    log::info!("papajobs listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[debug_handler(state = AppState)]
async fn index(State(gateway): State<Gateway>, session: Session) -> AppResult<Redirect> {
    if session::current_user(&session, &gateway).await?.is_some() {
        Ok(Redirect::to("/home"))
    } else {
        Ok(Redirect::to("/login"))
    }
}
