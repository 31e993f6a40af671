use actix_web::{web, App, HttpServer};
use tarot_backend::config::Settings;
use tarot_backend::infra::state::build_state;
use tarot_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use tarot_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Settings come from the process environment only (docker env_file,
    // or `set -a; . ./.env; set +a` locally).
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let host = settings.server.host.clone();
    let port = settings.server.port;

    // A catalog that cannot be loaded is fatal; storage and the text
    // generator degrade instead.
    let app_state = match build_state().with_settings(settings).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, "starting tarot backend");
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
