use clap::Parser;
use log::{error, info};
use macroquad::prelude::Conf;
use std::process;
use tankarena::config::{self, WINDOW_HEIGHT, WINDOW_WIDTH};
use tankarena::game::{Game, GameSettings};
use tankarena::geometry::PlayField;
use tankarena::logging;
use tankarena::render::Renderer;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of computer tanks to fight (1 to 8).
    #[arg(long, default_value_t = config::DEFAULT_ENEMY_COUNT)]
    enemies: u8,

    /// Seed for the computer tanks' attack radius. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "tank,turret,weapon,projectile")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Sound played when a tank fires.
    #[arg(long, default_value = "assets/boom.ogg")]
    fire_sound: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Tank Arena".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Tank Arena...");
    if args.debug_filter.is_none() {
        info!("Debug topics available: {}", logging::TOPICS.join(", "));
    }

    let settings = GameSettings {
        enemies: args.enemies,
        seed: args.seed,
        field: PlayField::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
        fire_sound: args.fire_sound,
    };

    let mut game = match Game::new(&settings) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create game: {}", e);
            process::exit(1);
        }
    };

    let renderer = Renderer::new();
    game.run(&renderer).await;
}
