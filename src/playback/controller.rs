//! Playback state machine for the single active audio source.

use std::io::Cursor;
use std::time::Duration;

/// State of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No source selected.
    Idle,
    /// Source assigned, paused at the current position.
    Loaded,
    Playing,
    Paused,
}

/// Tracks the one audio source that can be active at a time.
///
/// Switching sources abandons the previous one; there is no teardown
/// beyond dropping the reference. Elapsed time and duration are plain
/// state here — advancing the clock is the playback device's job.
pub struct Playback {
    state: PlaybackState,
    source: Option<String>,
    position: Duration,
    duration: Option<Duration>,
}

impl Playback {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            source: None,
            position: Duration::ZERO,
            duration: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Locator of the currently selected source, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the current source, once its metadata is known.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Select a new audio source.
    ///
    /// Valid from any state. The controller moves to `Loaded` with the
    /// position reset; the previous source's duration is forgotten.
    /// Playback does not start automatically.
    pub fn select(&mut self, audio_ref: impl Into<String>) {
        self.source = Some(audio_ref.into());
        self.state = PlaybackState::Loaded;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    /// Record the duration of the current source once metadata is ready.
    ///
    /// No-op while idle.
    pub fn set_duration(&mut self, duration: Duration) {
        if self.state != PlaybackState::Idle {
            self.duration = Some(duration);
        }
    }

    /// Toggle between playing and paused.
    ///
    /// `Loaded` and `Paused` move to `Playing`; `Playing` moves to
    /// `Paused`. No-op when idle. Returns the resulting state.
    pub fn toggle_play_pause(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Idle => PlaybackState::Idle,
            PlaybackState::Loaded | PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
        self.state
    }

    /// Seek to a fractional position in [0, 1].
    ///
    /// The fraction is clamped. Seeking requires a known duration;
    /// returns `false` (no state change) when the duration has not been
    /// reported yet or no source is selected.
    pub fn seek(&mut self, fraction: f64) -> bool {
        if self.state == PlaybackState::Idle {
            return false;
        }

        let Some(duration) = self.duration else {
            return false;
        };

        let fraction = fraction.clamp(0.0, 1.0);
        self.position = Duration::from_secs_f64(duration.as_secs_f64() * fraction);
        true
    }

    /// Handle the source playing to completion.
    ///
    /// `Playing` returns to `Loaded` with the position back at zero, the
    /// same place the playback device leaves it.
    pub fn on_natural_end(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Loaded;
            self.position = Duration::ZERO;
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the play time of a WAV file from its header.
///
/// Returns `None` when the bytes are not a parsable WAV stream.
pub fn wav_duration(bytes: &[u8]) -> Option<Duration> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
    let spec = reader.spec();
    let frames = reader.duration();

    if spec.sample_rate == 0 {
        return None;
    }

    Some(Duration::from_secs_f64(
        f64::from(frames) / f64::from(spec.sample_rate),
    ))
}
