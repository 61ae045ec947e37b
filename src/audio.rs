//! Audio collaborator using Web Audio API
//!
//! Renders simulation `SoundCue`s as procedurally generated tones - no
//! external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play every cue from one tick, in order
    pub fn play_all(&self, cues: &[SoundCue]) {
        for cue in cues {
            self.play(*cue);
        }
    }

    /// Play a single cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Shoot => self.play_shoot(ctx, vol),
            SoundCue::AlienShoot => self.play_alien_shoot(ctx, vol),
            SoundCue::Explosion => self.play_explosion(ctx, vol),
            SoundCue::LevelComplete => self.play_level_complete(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Short tone with a 10ms attack and exponential decay
    fn play_tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        duration: f64,
        osc_type: OscillatorType,
        peak: f32,
        delay: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(peak, t + 0.01).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Player shot - bright square blip
    fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
        self.play_tone(ctx, 800.0, 0.1, OscillatorType::Square, vol * 0.05, 0.0);
    }

    /// Alien shot - low sawtooth buzz
    fn play_alien_shoot(&self, ctx: &AudioContext, vol: f32) {
        self.play_tone(ctx, 200.0, 0.15, OscillatorType::Sawtooth, vol * 0.03, 0.0);
    }

    /// Alien destroyed - crackling burst over a falling thump
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.01).ok();
            osc.frequency().set_value_at_time(90.0, t + 0.03).ok();
            osc.frequency().set_value_at_time(1400.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(70.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.11).ok();
            osc.frequency().set_value_at_time(50.0, t + 0.14).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.2)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    /// Level complete - ascending arpeggio
    fn play_level_complete(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [440.0, 554.0, 659.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            self.play_tone(ctx, *freq, 0.3, OscillatorType::Sine, vol * 0.08, delay);
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [880.0, 659.0, 440.0, 220.0].iter().enumerate() {
            let delay = i as f64 * 0.3;
            self.play_tone(ctx, *freq, 0.4, OscillatorType::Sine, vol * 0.1, delay);
        }
    }
}
