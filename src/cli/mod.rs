//! CLI argument parsing and validation.

mod args;

pub use args::{
    Args, ENV_DEVICE, ENV_SMALL_MODELS, ModeSelection, ModeSelectionError, ModelSize,
};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> Args {
        let full: Vec<&str> = std::iter::once("voiceforge-rs")
            .chain(argv.iter().copied())
            .collect();
        Args::parse_from(full)
    }

    // ===========================================
    // Mode selection tests
    // ===========================================

    #[test]
    fn test_no_generation_flags_is_none() {
        let args = parse(&["--history"]);
        assert_eq!(args.mode_selection().unwrap(), None);
    }

    #[test]
    fn test_preset_mode_selection() {
        let args = parse(&["--text", "Hello world", "--preset", "Deep Male"]);
        assert_eq!(
            args.mode_selection().unwrap(),
            Some(ModeSelection::Preset("Deep Male".to_string()))
        );
    }

    #[test]
    fn test_design_mode_selection() {
        let args = parse(&["--text", "Hello", "--design", "A warm female voice"]);
        assert_eq!(
            args.mode_selection().unwrap(),
            Some(ModeSelection::Design("A warm female voice".to_string()))
        );
    }

    #[test]
    fn test_clone_mode_selection_with_transcript() {
        let args = parse(&[
            "--text",
            "Hello",
            "--clone",
            "ref.wav",
            "--transcript",
            "reference words",
        ]);
        assert_eq!(
            args.mode_selection().unwrap(),
            Some(ModeSelection::Clone {
                reference_audio: PathBuf::from("ref.wav"),
                transcript: Some("reference words".to_string()),
            })
        );
    }

    #[test]
    fn test_text_without_mode_is_error() {
        let args = parse(&["--text", "Hello"]);
        assert!(matches!(
            args.mode_selection().unwrap_err(),
            ModeSelectionError::MissingMode
        ));
    }

    #[test]
    fn test_mode_without_text_is_error() {
        let args = parse(&["--preset", "Deep Male"]);
        assert!(matches!(
            args.mode_selection().unwrap_err(),
            ModeSelectionError::MissingText
        ));
    }

    #[test]
    fn test_multiple_modes_is_error() {
        let args = parse(&[
            "--text",
            "Hello",
            "--preset",
            "Deep Male",
            "--design",
            "A warm voice",
        ]);
        assert!(matches!(
            args.mode_selection().unwrap_err(),
            ModeSelectionError::MultipleModes
        ));
    }

    // ===========================================
    // Model size tests
    // ===========================================

    #[test]
    fn test_model_size_default_is_large() {
        let args = parse(&["--history"]);
        assert_eq!(args.model_size(), ModelSize::Large);
        assert_eq!(args.model_size().as_str(), "1.7B");
    }

    #[test]
    fn test_small_flag_selects_small_model() {
        let args = parse(&["--small", "--history"]);
        assert_eq!(args.model_size(), ModelSize::Small);
        assert_eq!(args.model_size().as_str(), "0.6B");
    }

    // ===========================================
    // Defaults
    // ===========================================

    #[test]
    fn test_connection_defaults() {
        let args = parse(&["--history"]);
        assert_eq!(args.host, "localhost");
        assert_eq!(args.port, 8000);
        assert_eq!(args.language, "Auto");
        assert_eq!(args.output, PathBuf::from("output.wav"));
    }
}
