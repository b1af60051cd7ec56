use std::env;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingueefy_content::{app, config::Config, db, quiz::ParseOptions, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "lingueefy_content=info,tower_http=info".into())
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let pool = db::connect(&cfg).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        db: pool,
        parse: ParseOptions { plain_text_fallback: cfg.quiz_plain_text_fallback },
    };
    let app = app(state, cfg.body_limit);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(plain_text_fallback = cfg.quiz_plain_text_fallback, "listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
