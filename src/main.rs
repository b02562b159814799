use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use snake_canvas::app::App;
use snake_canvas::config::{config_path, load_config};
use snake_canvas::game::RandomSpawner;
use snake_canvas::session::GameLoop;
use snake_canvas::store::JsonFileStore;

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: 480,
        window_height: 640,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(config_path());
    let seed = (macroquad::miniquad::date::now() * 1_000_000.0) as u64;
    macroquad::rand::srand(seed);

    let store = JsonFileStore::new(&config.save_path);
    let mut app = App::new(GameLoop::new(config, store, RandomSpawner));

    loop {
        app.frame();
        next_frame().await;
    }
}
