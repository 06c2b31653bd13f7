use log::{error, info};

use messaging_service::{app, integration, state::AppState};

#[tokio::main]
async fn main() {
    let cfg = integration::Config::default();

    let state = match AppState::init(&cfg).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize app state: {e}");
            std::process::exit(1);
        }
    };

    let app = app(state).layer(cfg.env.cors());

    let addr = cfg.env.addr();
    info!("Listening on {addr}");

    if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
        error!("Server stopped: {e}");
    }
}
