//! Loupe - a lightweight web viewer for SQLite databases.

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use tracing::info;

use db_loupe::batch::BatchRunner;
use db_loupe::cli::Cli;
use db_loupe::config::Config;
use db_loupe::logging;
use db_loupe::store::{SqlStore, SqliteStore};
use db_loupe::web::{self as api, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    logging::init_stderr_logging();

    let cli = Cli::parse_args();
    let mut config = Config::load_from_file(&cli.config_path())?;
    config.apply_cli(&cli);

    let store: Arc<dyn SqlStore> = Arc::new(SqliteStore::open(&cli.database).await?);
    let runner = Arc::new(BatchRunner::new(store.clone()));

    let state = web::Data::new(AppState {
        store,
        runner,
        db_path: cli.database.display().to_string(),
        max_rows: config.limits.max_rows,
    });

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Serving {} on http://{bind_addr}", cli.database.display());

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
