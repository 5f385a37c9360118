use log::warn;
use macroquad::audio::{Sound, load_sound, play_sound_once};

/// Sound effects the simulation can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Fire,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Fire => "boom",
        }
    }
}

/// Fire-and-forget sound playback.
pub trait SoundSink {
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Sink that drops every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl SoundSink for Silence {
    fn play_effect(&mut self, _effect: SoundEffect) {}
}

#[derive(Default)]
pub struct AudioManager {
    fire_sound: Option<Sound>,
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    // Load all required sound assets
    pub async fn load_assets(&mut self, fire_path: &str) {
        self.fire_sound = load_sound(fire_path)
            .await
            .map_err(|e| {
                warn!("Failed to load fire sound '{}': {}", fire_path, e);
                e
            })
            .ok();
    }
}

impl SoundSink for AudioManager {
    fn play_effect(&mut self, effect: SoundEffect) {
        let sound = match effect {
            SoundEffect::Fire => self.fire_sound.as_ref(),
        };
        if let Some(sound) = sound {
            play_sound_once(sound);
        }
    }
}
