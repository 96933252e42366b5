//! DroidVoice Configuration Library
//!
//! This crate provides the plain data types shared by the audio backend and
//! the command line: effect settings, voice settings, and the phrase catalog.
//!
//! # Example
//!
//! ```
//! use droidvoice_spec::{EffectsConfig, PhraseCatalog};
//!
//! let config = EffectsConfig::default().with_pitch_shift(8.0);
//! assert!(config.validate().is_ok());
//!
//! let catalog = PhraseCatalog::builtin();
//! for phrase in catalog.phrases().take(3) {
//!     println!("{} #{}: {}", phrase.category, phrase.number, phrase.text);
//! }
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Phrase categories and the stock phrase library
//! - [`effects`]: Effects chain and output format settings
//! - [`error`]: Validation errors and the shared `BackendError` trait
//! - [`voice`]: Settings passed through to speech sources

pub mod catalog;
pub mod effects;
pub mod error;
pub mod voice;

// Re-export commonly used types at the crate root
pub use catalog::{Phrase, PhraseCatalog, PhraseCategory};
pub use effects::{EffectsConfig, MAX_SHIFT_SEMITONES, MAX_SPEED_RATE, MIN_SPEED_RATE};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use voice::VoiceConfig;
