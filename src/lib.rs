//! voiceforge-rs: VoiceForge text-to-speech client.
//!
//! This crate provides a command-line client and library for a VoiceForge
//! backend: preset-voice synthesis, voice design from natural-language
//! descriptions, voice cloning from reference audio, and a persistent
//! local library of past generations.

pub mod backend;
pub mod cli;
pub mod engine;
pub mod library;
pub mod playback;
pub mod store;
