use std::sync::Arc;

use range_api::config::{Config, CONFIG_SOURCE};
use range_api::error::StartupError;
use range_api::state::AppContext;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let app_context: AppContext =
        tr_app::create_app_context::<AppContext, Config>(CONFIG_SOURCE).await?;

    let addr = app_context.config.addr();
    let allowed_origins = app_context.config.cors_allowed_origins.clone();
    tracing::info!(
        settings = ?app_context.game.settings(),
        "starting range api"
    );

    let app = tr_axum::with_common_layers(
        range_api::router(Arc::new(app_context)),
        &allowed_origins,
    );

    tr_axum::run_app(app, addr).await?;

    Ok(())
}
