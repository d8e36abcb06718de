use std::sync::Arc;

use crate::config::Config;
use crate::game::Game;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub game: Game,
}

impl tr_app::ContextProvider<Config> for AppContext {
    async fn new(config: Config) -> Self {
        let game = Game::new(config.game_settings());

        Self { config, game }
    }
}

pub type AppState = Arc<AppContext>;
