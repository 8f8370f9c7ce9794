//! Sound cues
//!
//! Game events map onto a handful of short clips. On the web they play
//! through `HtmlAudioElement`; natively they are only logged.

use crate::platform::Presenter;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Any item eaten
    Eat,
    /// Ghost bounced off a wall
    Bounce,
    /// Round over
    Death,
    /// Menu/button feedback
    Click,
    /// Final score made the leaderboard
    HighScore,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Eat,
        SoundEffect::Bounce,
        SoundEffect::Death,
        SoundEffect::Click,
        SoundEffect::HighScore,
    ];

    /// Clip served next to the page
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::Eat => "./sounds/eat.mp3",
            SoundEffect::Bounce => "./sounds/bounce.mp3",
            SoundEffect::Death => "./sounds/death.mp3",
            SoundEffect::Click => "./sounds/click.wav",
            SoundEffect::HighScore => "./sounds/high-score.mp3",
        }
    }

    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::Bounced { .. } => Some(SoundEffect::Bounce),
            GameEvent::GameOver { .. } => Some(SoundEffect::Death),
            GameEvent::RoundStarted | GameEvent::Paused | GameEvent::Resumed => {
                Some(SoundEffect::Click)
            }
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    volume: f32,
    #[cfg(target_arch = "wasm32")]
    clips: Vec<(SoundEffect, web_sys::HtmlAudioElement)>,
    /// Rejection handler attached to every `play()` promise
    #[cfg(target_arch = "wasm32")]
    on_reject: wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
            #[cfg(target_arch = "wasm32")]
            clips: load_clips(),
            #[cfg(target_arch = "wasm32")]
            on_reject: wasm_bindgen::closure::Closure::<dyn FnMut(_)>::new(
                |reason: wasm_bindgen::JsValue| {
                    log::debug!("Audio playback rejected: {:?}", reason);
                },
            ),
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play a cue; returns false when muted or the clip is unavailable
    pub fn play(&self, effect: SoundEffect) -> bool {
        if self.volume <= 0.0 {
            return false;
        }
        self.play_clip(effect)
    }

    #[cfg(target_arch = "wasm32")]
    fn play_clip(&self, effect: SoundEffect) -> bool {
        let Some((_, clip)) = self.clips.iter().find(|(e, _)| *e == effect) else {
            return false;
        };
        clip.set_volume(self.volume as f64);
        clip.set_current_time(0.0);
        // Autoplay blocks arrive as a rejected promise
        match clip.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_reject);
                true
            }
            Err(e) => {
                log::warn!("Audio playback failed for {:?}: {:?}", effect, e);
                false
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_clip(&self, effect: SoundEffect) -> bool {
        log::debug!("Sound {:?} at volume {:.2}", effect, self.volume);
        true
    }
}

#[cfg(target_arch = "wasm32")]
fn load_clips() -> Vec<(SoundEffect, web_sys::HtmlAudioElement)> {
    SoundEffect::ALL
        .into_iter()
        .filter_map(|effect| match web_sys::HtmlAudioElement::new_with_src(effect.path()) {
            Ok(clip) => Some((effect, clip)),
            Err(e) => {
                log::warn!("Failed to load {}: {:?}", effect.path(), e);
                None
            }
        })
        .collect()
}

impl Presenter for AudioManager {
    fn present(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
