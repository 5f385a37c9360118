use crate::audio::AudioManager;
use crate::battlefield::Battlefield;
use crate::config;
use crate::error::GameError;
use crate::geometry::{PlayField, Point};
use crate::input::{InputSource, KeyboardInput};
use crate::render::Renderer;
use crate::tank::TankKind;
use crate::view::TankView;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use log::info;
use macroquad::prelude::{KeyCode, get_frame_time, is_key_down, next_frame, screen_height, screen_width};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    pub fn announcement(self) -> &'static str {
        match self {
            Outcome::Victory => "Victory!",
            Outcome::Defeat => "Defeat!",
        }
    }
}

/// Options the game is started with.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub enemies: u8,
    pub seed: Option<u64>,
    pub field: PlayField,
    pub fire_sound: String,
}

/// The Game struct owns the battlefield and runs the fixed-tick loop
pub struct Game {
    pub battlefield: Battlefield,
    audio: AudioManager,
    fire_sound: String,
    pub current_tick: u64,
    time_accumulator: f32,
    tick_duration: f32,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(settings: &GameSettings) -> Result<Self, GameError> {
        if settings.enemies == 0 || settings.enemies > config::MAX_ENEMY_COUNT {
            return Err(GameError::InvalidEnemyCount {
                requested: settings.enemies,
                max: config::MAX_ENEMY_COUNT,
            });
        }

        let field = settings.field;
        let min_side = 2.0 * config::EDGE_MARGIN + config::TANK_WIDTH.max(config::TANK_HEIGHT);
        if field.width < min_side || field.height < min_side {
            return Err(GameError::PlayFieldTooSmall {
                width: field.width,
                height: field.height,
            });
        }

        let mut rng = match settings.seed {
            Some(seed) => {
                info!("Seeding tank presets with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let mut battlefield = Battlefield::new(field);
        info!("Battlefield created at {:.0}x{:.0}.", field.width, field.height);

        // Player at the bottom, enemies spread along the top
        let player_y = (field.height - 100.0).max(config::EDGE_MARGIN);
        battlefield.spawn(Point::new(field.width / 2.0, player_y), TankKind::Player, &mut rng);

        let slots = settings.enemies as f64 + 1.0;
        let enemy_y = 120.0_f64.min(field.height / 2.0);
        for i in 0..settings.enemies {
            let x = field.width * (i as f64 + 1.0) / slots;
            battlefield.spawn(Point::new(x, enemy_y), TankKind::Computer, &mut rng);
        }
        info!("Spawned {} computer tanks.", settings.enemies);

        Ok(Game {
            battlefield,
            audio: AudioManager::new(),
            fire_sound: settings.fire_sound.clone(),
            current_tick: 0,
            time_accumulator: 0.0,
            tick_duration: 1.0 / config::TICK_RATE as f32,
            outcome: None,
        })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn views(&self) -> Vec<TankView> {
        self.battlefield.tanks().iter().map(TankView::of).collect()
    }

    fn hud(&self) -> Vec<String> {
        let health = self.battlefield.player().map_or(0, |p| p.health());
        vec![
            format!("Tick {}", self.current_tick),
            format!("Health {}", health),
            format!("Enemies {}", self.battlefield.count(TankKind::Computer)),
        ]
    }

    /// Run the main game loop using the provided renderer
    pub async fn run(&mut self, renderer: &Renderer) {
        self.audio.load_assets(&self.fire_sound).await;
        info!("Starting main loop...");

        let input = KeyboardInput;
        while !is_key_down(KeyCode::Escape) && self.outcome.is_none() {
            self.battlefield.set_field(PlayField::new(
                screen_width() as f64,
                screen_height() as f64,
            ));

            // Fixed simulation update loop
            self.time_accumulator += get_frame_time();
            while self.time_accumulator >= self.tick_duration {
                self.time_accumulator -= self.tick_duration;
                self.update_simulation(&input);
                if self.outcome.is_some() {
                    break;
                }
            }

            renderer.draw_frame(&self.views(), &self.hud(), None);
            next_frame().await;
        }

        // After game over, show announcement and wait for ESC
        if let Some(outcome) = self.outcome {
            info!("Match over: {:?} after {} ticks", outcome, self.current_tick);
            while !is_key_down(KeyCode::Escape) {
                renderer.draw_frame(&self.views(), &self.hud(), Some(outcome.announcement()));
                next_frame().await;
            }
        }
        info!("Exiting Tank Arena.");
    }

    /// Update the simulation state for one fixed tick
    pub fn update_simulation(&mut self, input: &dyn InputSource) {
        let report = self.battlefield.step(input, &mut self.audio);
        self.current_tick += 1;

        if report.hits > 0 {
            log::debug!("Tick {}: {} hits landed", self.current_tick, report.hits);
        }

        if self.battlefield.player().is_none() {
            self.outcome = Some(Outcome::Defeat);
        } else if self.battlefield.count(TankKind::Computer) == 0 {
            self.outcome = Some(Outcome::Victory);
        }
    }
}
