//! Audio playback state tracking.
//!
//! Models the single audio element the UI drives: one source at a time,
//! play/pause/seek, and a duration learned from the WAV header after the
//! audio bytes arrive.

mod controller;

pub use controller::{Playback, PlaybackState, wav_duration};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    fn wav_bytes(sample_rate: u32, frames: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
            for _ in 0..frames {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        buf.into_inner()
    }

    // ===========================================
    // State machine transitions
    // ===========================================

    #[test]
    fn test_starts_idle() {
        let playback = Playback::new();
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.source().is_none());
    }

    #[test]
    fn test_select_loads_without_starting() {
        let mut playback = Playback::new();
        playback.select("/static/generations/preset_1.wav");

        assert_eq!(playback.state(), PlaybackState::Loaded);
        assert_eq!(
            playback.source(),
            Some("/static/generations/preset_1.wav")
        );
        assert_eq!(playback.position(), Duration::ZERO);
    }

    #[test]
    fn test_toggle_cycles_playing_and_paused() {
        let mut playback = Playback::new();
        playback.select("a.wav");

        assert_eq!(playback.toggle_play_pause(), PlaybackState::Playing);
        assert_eq!(playback.toggle_play_pause(), PlaybackState::Paused);
        assert_eq!(playback.toggle_play_pause(), PlaybackState::Playing);
    }

    #[test]
    fn test_toggle_while_idle_is_noop() {
        let mut playback = Playback::new();
        assert_eq!(playback.toggle_play_pause(), PlaybackState::Idle);
    }

    #[test]
    fn test_select_replaces_source_and_resets() {
        let mut playback = Playback::new();
        playback.select("first.wav");
        playback.set_duration(Duration::from_secs(10));
        playback.toggle_play_pause();
        playback.seek(0.5);

        playback.select("second.wav");

        assert_eq!(playback.state(), PlaybackState::Loaded);
        assert_eq!(playback.source(), Some("second.wav"));
        assert_eq!(playback.position(), Duration::ZERO);
        assert!(playback.duration().is_none());
    }

    #[test]
    fn test_natural_end_returns_to_loaded_at_zero() {
        let mut playback = Playback::new();
        playback.select("a.wav");
        playback.set_duration(Duration::from_secs(4));
        playback.toggle_play_pause();
        playback.seek(1.0);

        playback.on_natural_end();

        assert_eq!(playback.state(), PlaybackState::Loaded);
        assert_eq!(playback.position(), Duration::ZERO);
    }

    #[test]
    fn test_natural_end_while_paused_is_noop() {
        let mut playback = Playback::new();
        playback.select("a.wav");
        playback.toggle_play_pause();
        playback.toggle_play_pause();

        playback.on_natural_end();
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    // ===========================================
    // Seeking
    // ===========================================

    #[test]
    fn test_seek_requires_known_duration() {
        let mut playback = Playback::new();
        playback.select("a.wav");

        assert!(!playback.seek(0.5));
        assert_eq!(playback.position(), Duration::ZERO);
    }

    #[test]
    fn test_seek_sets_fraction_of_duration() {
        let mut playback = Playback::new();
        playback.select("a.wav");
        playback.set_duration(Duration::from_secs(8));

        assert!(playback.seek(0.25));
        assert_eq!(playback.position(), Duration::from_secs(2));
    }

    #[test]
    fn test_seek_clamps_fraction() {
        let mut playback = Playback::new();
        playback.select("a.wav");
        playback.set_duration(Duration::from_secs(8));

        assert!(playback.seek(1.5));
        assert_eq!(playback.position(), Duration::from_secs(8));

        assert!(playback.seek(-0.5));
        assert_eq!(playback.position(), Duration::ZERO);
    }

    #[test]
    fn test_seek_while_idle_is_noop() {
        let mut playback = Playback::new();
        assert!(!playback.seek(0.5));
    }

    // ===========================================
    // WAV duration probe
    // ===========================================

    #[test]
    fn test_wav_duration_from_header() {
        let bytes = wav_bytes(16000, 16000);
        assert_eq!(wav_duration(&bytes), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_wav_duration_half_second() {
        let bytes = wav_bytes(24000, 12000);
        assert_eq!(wav_duration(&bytes), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_wav_duration_rejects_garbage() {
        assert!(wav_duration(b"not a wav file").is_none());
    }
}
