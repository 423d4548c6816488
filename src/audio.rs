//! Audio feedback using the Web Audio and Web Speech APIs
//!
//! Tones are generated procedurally, no sound files needed. Every browser
//! call is allowed to fail; failures only cost the sound.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType, SpeechSynthesisUtterance};

use crate::narration::{Narrator, prompt};
use crate::settings::Settings;
use crate::sim::{Mode, Symbol};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Matching bubble popped
    Correct,
    /// Wrong bubble tapped
    Wrong,
    /// Fresh board dealt
    NewBoard,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Set effect volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Correct => self.play_correct(ctx, vol),
            SoundEffect::Wrong => self.play_wrong(ctx, vol),
            SoundEffect::NewBoard => self.play_new_board(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Correct - bright rising pop
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(500.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1200.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Wrong - low buzz
    fn play_wrong(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// New board - short ascending arpeggio
    fn play_new_board(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}

/// Browser narrator: speech synthesis for targets, tones for taps
pub struct WebNarrator {
    audio: AudioManager,
    speech: bool,
}

impl WebNarrator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            audio: AudioManager::new(settings.effective_sfx_volume()),
            speech: settings.speech,
        }
    }

    /// Re-read audio preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.audio.set_volume(settings.effective_sfx_volume());
        self.speech = settings.speech;
    }

    fn speak(&self, text: &str) {
        let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
            log::debug!("Speech synthesis unavailable");
            return;
        };
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                // A new prompt replaces whatever is still being read out
                synth.cancel();
                synth.speak(&utterance);
            }
            Err(_) => log::warn!("Could not create utterance for {:?}", text),
        }
    }
}

impl Narrator for WebNarrator {
    fn announce_target(&mut self, mode: Mode, symbol: Symbol) {
        if self.speech {
            self.speak(&prompt(mode, symbol));
        }
    }

    fn correct(&mut self) {
        self.audio.play(SoundEffect::Correct);
    }

    fn incorrect(&mut self) {
        self.audio.play(SoundEffect::Wrong);
    }

    fn new_board(&mut self, _placed: usize) {
        self.audio.play(SoundEffect::NewBoard);
    }

    fn stopped(&mut self) {
        if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
            synth.cancel();
        }
    }
}
