//! voiceforge-rs CLI entry point.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Parser;
use voiceforge_rs::backend::{RequestMode, TtsBackend, create_backend};
use voiceforge_rs::cli::{Args, ENV_DEVICE, ENV_SMALL_MODELS, ModeSelection};
use voiceforge_rs::engine::Studio;
use voiceforge_rs::library::{FolderFilter, FolderRegistry, GenerationRecord, HistoryStore};
use voiceforge_rs::playback::wav_duration;
use voiceforge_rs::store::{FileStore, KvStore};

fn main() -> Result<()> {
    let args = Args::parse();

    // Environment consumed by the backend launcher, not by this client.
    // SAFETY: set before any other thread exists.
    if args.cpu {
        unsafe { std::env::set_var(ENV_DEVICE, "cpu") };
    }
    if args.small {
        unsafe { std::env::set_var(ENV_SMALL_MODELS, "1") };
    }

    // Assemble the library and backend
    let history = HistoryStore::load(FileStore::new());
    let folders = FolderRegistry::load(FileStore::new());
    let backend = create_backend(&args.host, args.port);
    let mut studio = Studio::new(backend, history, folders);

    // Handle catalog commands first
    if args.status {
        return show_status(&studio);
    }

    if args.list_presets {
        return list_presets(&studio);
    }

    if args.list_languages {
        return list_languages(&studio);
    }

    // Library management commands
    if let Some(name) = &args.new_folder {
        if studio.create_folder(name).context("Failed to create folder")? {
            println!("Folder '{}' created.", name.trim());
        } else {
            println!("Folder '{}' already exists.", name.trim());
        }
        return Ok(());
    }

    if let Some(name) = &args.delete_folder {
        return delete_folder(&mut studio, name);
    }

    if args.folders {
        return list_folders(&studio);
    }

    if args.history {
        return show_history(&studio, args.folder.as_deref());
    }

    if let Some(id) = args.delete {
        return delete_record(&mut studio, id);
    }

    if let Some(id) = args.rename {
        let Some(label) = &args.label else {
            bail!("--rename requires --label");
        };
        if studio.rename_record(id, label).context("Failed to rename record")? {
            println!("Record {id} renamed to '{}'.", label.trim());
        } else {
            println!("Record {id} not renamed.");
        }
        return Ok(());
    }

    if let Some(id) = args.move_record {
        let Some(folder) = &args.folder else {
            bail!("--move requires --folder");
        };
        if studio.move_record(id, folder).context("Failed to move record")? {
            println!("Record {id} moved to '{folder}'.");
        } else {
            println!("No record with id {id}.");
        }
        return Ok(());
    }

    if let Some(id) = args.play {
        return play_record(&mut studio, id, &args);
    }

    // Generate speech if requested
    if let Some(mode) = args.mode_selection()? {
        return generate_speech(&mut studio, mode, &args);
    }

    // No action specified
    eprintln!("No action specified. Use --preset/--design/--clone with --text to generate speech.");
    eprintln!("Run with --help for usage information.");

    Ok(())
}

fn show_status<B: TtsBackend, S: KvStore>(studio: &Studio<B, S>) -> Result<()> {
    let status = studio.status().context("Failed to fetch engine status")?;

    println!("Engine status:");
    println!("  Device: {}", status.device);
    if let Some(dtype) = &status.dtype {
        println!("  Dtype: {dtype}");
    }
    println!(
        "  Model size: {}",
        if status.use_small_models { "0.6B" } else { "1.7B" }
    );
    println!("  Presets available: {}", status.available_presets.len());

    Ok(())
}

fn list_presets<B: TtsBackend, S: KvStore>(studio: &Studio<B, S>) -> Result<()> {
    let presets = studio.list_presets().context("Failed to list presets")?;

    if presets.is_empty() {
        println!("No presets available.");
        return Ok(());
    }

    println!("Available presets:");
    for (name, description) in presets {
        println!("  {name}");
        println!("    {description}");
    }

    Ok(())
}

fn list_languages<B: TtsBackend, S: KvStore>(studio: &Studio<B, S>) -> Result<()> {
    let languages = studio.list_languages().context("Failed to list languages")?;

    println!("Supported languages:");
    for language in languages {
        println!("  {language}");
    }

    Ok(())
}

fn list_folders<B: TtsBackend, S: KvStore>(studio: &Studio<B, S>) -> Result<()> {
    let folders = studio.folders().list();

    if folders.is_empty() {
        println!("No folders yet.");
        return Ok(());
    }

    println!("Folders:");
    for name in folders {
        println!("  {name}");
    }

    Ok(())
}

fn delete_folder<B: TtsBackend, S: KvStore>(studio: &mut Studio<B, S>, name: &str) -> Result<()> {
    match studio.delete_folder(name).context("Failed to delete folder")? {
        Some(moved) => {
            println!("Folder '{name}' deleted; {moved} record(s) moved to Unfiled.");
        }
        None => println!("No folder named '{name}'."),
    }

    Ok(())
}

fn show_history<B: TtsBackend, S: KvStore>(
    studio: &Studio<B, S>,
    folder: Option<&str>,
) -> Result<()> {
    let selector = match folder {
        Some(name) => FolderFilter::Folder(name.to_string()),
        None => FolderFilter::All,
    };

    let mut shown = 0;
    for record in studio.history().filter(&selector) {
        print_record(record);
        shown += 1;
    }

    if shown == 0 {
        match folder {
            Some(name) => println!("No records in folder '{name}'."),
            None => println!("No history yet."),
        }
    }

    Ok(())
}

fn print_record(record: &GenerationRecord) {
    println!(
        "  [{}] {} ({}, {})",
        record.id,
        record.label,
        record.mode.as_str(),
        record.created_at
    );
    println!("      Folder: {}", record.folder);
    println!("      Audio: {}", record.audio_ref);
}

fn delete_record<B: TtsBackend, S: KvStore>(studio: &mut Studio<B, S>, id: i64) -> Result<()> {
    let outcome = studio
        .delete_record(id)
        .with_context(|| format!("Failed to delete record {id}"))?;

    if !outcome.removed {
        println!("No record with id {id}.");
        return Ok(());
    }

    println!("Record {id} deleted.");
    if let Some(warning) = outcome.remote_warning {
        eprintln!("Warning: {warning}");
    }

    Ok(())
}

fn play_record<B: TtsBackend, S: KvStore>(
    studio: &mut Studio<B, S>,
    id: i64,
    args: &Args,
) -> Result<()> {
    let record = studio
        .play_record(id)
        .with_context(|| format!("Failed to play record {id}"))?;

    println!("Playing [{}] {}", record.id, record.label);

    save_audio(studio, &record.audio_ref, args)
}

fn generate_speech<B: TtsBackend, S: KvStore>(
    studio: &mut Studio<B, S>,
    mode: ModeSelection,
    args: &Args,
) -> Result<()> {
    let text = args.text.as_deref().unwrap_or_default();

    let request_mode = match mode {
        ModeSelection::Preset(preset_name) => {
            println!("Generating with preset '{preset_name}'...");
            RequestMode::Preset { preset_name }
        }
        ModeSelection::Design(voice_description) => {
            println!("Generating with designed voice...");
            RequestMode::Design { voice_description }
        }
        ModeSelection::Clone {
            reference_audio,
            transcript,
        } => {
            println!("Generating with cloned voice from {}...", reference_audio.display());
            RequestMode::Clone {
                reference_audio,
                reference_text: transcript,
            }
        }
    };

    let record = studio
        .generate(text, request_mode, &args.language, args.model_size())
        .context("Failed to generate speech")?;

    println!("Generated record [{}] {}", record.id, record.label);

    save_audio(studio, &record.audio_ref, args)
}

fn save_audio<B: TtsBackend, S: KvStore>(
    studio: &mut Studio<B, S>,
    audio_ref: &str,
    args: &Args,
) -> Result<()> {
    let audio_data = studio
        .fetch_audio(audio_ref)
        .context("Failed to download generated audio")?;

    if let Some(duration) = wav_duration(&audio_data) {
        studio.playback_mut().set_duration(duration);
        println!("  Duration: {:.2}s", duration.as_secs_f64());
    }

    let mut file = fs::File::create(&args.output)
        .with_context(|| format!("Failed to create output file: {}", args.output.display()))?;

    file.write_all(&audio_data)
        .with_context(|| format!("Failed to write audio to: {}", args.output.display()))?;

    println!("Audio saved to: {}", args.output.display());
    println!("  Size: {} bytes", audio_data.len());

    Ok(())
}
