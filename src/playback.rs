//! Playback state machine and the status-message side channel.
//!
//! `Unloaded → Loaded → Playing ⇄ Paused`, with a terminal `Failed` state
//! when the asset cannot load. The audio context must be initialized by an
//! explicit user action before playback can start; controls invoked with
//! unmet preconditions are no-ops that only update the status message.

use crate::error::Result;

/// Loading and playback lifecycle of the audio asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unloaded,
    Loaded,
    Playing,
    Paused,
    /// Asset load failed; terminal
    Failed,
}

/// Playback controller fed by the external audio collaborator's callbacks
#[derive(Debug)]
pub struct Playback {
    state: PlaybackState,
    context_ready: bool,
    status: &'static str,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Unloaded,
            context_ready: false,
            status: "ready for audio initialization",
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True only in the `Playing` state; gates all scene mutation
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Human-readable status line for the display side channel
    pub fn status(&self) -> &'static str {
        self.status
    }

    /// Feed the asset loader callback outcome into the state machine
    pub fn on_load(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) if self.state == PlaybackState::Unloaded => {
                self.state = PlaybackState::Loaded;
                self.status = "audio loaded";
            }
            Ok(()) => {}
            Err(_) => {
                self.state = PlaybackState::Failed;
                self.status = "audio load failed";
            }
        }
    }

    /// Mark the start of an audio-context activation attempt. The outcome
    /// arrives later through `on_context_init`.
    pub fn begin_context_init(&mut self) {
        self.status = "initializing audio...";
    }

    /// Feed the audio-context activation outcome into the state machine.
    /// Failure is retryable: the context simply stays uninitialized.
    pub fn on_context_init(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                self.context_ready = true;
                self.status = "audio ready";
            }
            Err(_) => {
                self.status = "audio initialization failed";
            }
        }
    }

    /// Toggle play/pause. A no-op (with a status message) when the context
    /// is not initialized or no asset is loaded.
    pub fn toggle(&mut self) {
        if !self.context_ready {
            self.status = "initialize audio first";
            return;
        }

        match self.state {
            PlaybackState::Unloaded | PlaybackState::Failed => {
                self.status = "audio file not found";
            }
            PlaybackState::Loaded | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                self.status = "exploring garden";
            }
            PlaybackState::Playing => {
                self.state = PlaybackState::Paused;
                self.status = "garden paused";
            }
        }
    }
}
