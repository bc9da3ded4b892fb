//! Stroke-sound planning: which pencil voice plays, and when it pauses.
//!
//! Audio playback lives in the shell; this module only decides. The plan
//! consumes the engine's stroke events and emits [`SoundCommand`]s: pick a
//! random voice per stroke and start it looping, pause it when the stroke
//! slows below the audible threshold, resume on movement, stop on stroke end.
//! A short quiet deadline catches the case where the pointer stops moving
//! without lifting — no move events arrive, so [`SoundPlan::tick`] pauses the
//! voice once the deadline passes.

#[cfg(test)]
#[path = "sound_test.rs"]
mod sound_test;

use rand::Rng;

use crate::consts::{SOUND_PAUSE_DELAY_MS, SOUND_SPEED_THRESHOLD, SOUND_VOICES};

/// Playback instruction for the shell's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCommand {
    /// Begin looping the given voice (0-based index into the shipped set).
    Start { voice: u32 },
    Pause,
    Resume,
    Stop,
}

/// Decision state for the pencil sound across one or more strokes.
#[derive(Debug)]
pub struct SoundPlan {
    enabled: bool,
    /// Voice locked for the current stroke; `None` between strokes.
    voice: Option<u32>,
    paused: bool,
    quiet_deadline: Option<f64>,
}

impl SoundPlan {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled, voice: None, paused: false, quiet_deadline: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The voice locked for the current stroke, if one is playing.
    #[must_use]
    pub fn voice(&self) -> Option<u32> {
        self.voice
    }

    /// Enable or disable the plan. Disabling stops any active voice.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<SoundCommand> {
        self.enabled = enabled;
        if enabled {
            return Vec::new();
        }
        self.stop()
    }

    /// React to a stroke-activity event carrying the current speed in px/ms.
    pub fn on_activity(&mut self, speed: f64, ts_ms: f64) -> Vec<SoundCommand> {
        if !self.enabled {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if self.voice.is_none() {
            let voice = rand::rng().random_range(0..SOUND_VOICES);
            self.voice = Some(voice);
            self.paused = false;
            commands.push(SoundCommand::Start { voice });
        }
        self.quiet_deadline = None;

        if speed < SOUND_SPEED_THRESHOLD {
            if !self.paused {
                self.paused = true;
                commands.push(SoundCommand::Pause);
            }
        } else {
            if self.paused {
                self.paused = false;
                commands.push(SoundCommand::Resume);
            }
            self.quiet_deadline = Some(ts_ms + SOUND_PAUSE_DELAY_MS);
        }
        commands
    }

    /// React to the stroke ending: halt playback and forget the voice so the
    /// next stroke picks a fresh one.
    pub fn on_stroke_end(&mut self) -> Vec<SoundCommand> {
        self.stop()
    }

    /// Fire the quiet deadline if due; pauses a voice left running after
    /// movement stopped without a pointer-up.
    pub fn tick(&mut self, ts_ms: f64) -> Vec<SoundCommand> {
        let Some(deadline) = self.quiet_deadline else {
            return Vec::new();
        };
        if ts_ms < deadline {
            return Vec::new();
        }
        self.quiet_deadline = None;
        if self.voice.is_some() && !self.paused {
            self.paused = true;
            return vec![SoundCommand::Pause];
        }
        Vec::new()
    }

    fn stop(&mut self) -> Vec<SoundCommand> {
        self.quiet_deadline = None;
        self.paused = false;
        if self.voice.take().is_some() {
            vec![SoundCommand::Stop]
        } else {
            Vec::new()
        }
    }
}
