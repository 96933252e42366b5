//! DroidVoice Audio Backend
//!
//! Turns synthesized speech into short robot-voice clips for
//! microcontroller playback.
//!
//! # Pipeline
//!
//! 1. A [`SpeechSource`] produces a mono [`Waveform`] at its native rate.
//! 2. [`effects::apply_effects`] time-stretches, pitch-shifts and bends the
//!    tail of the clip upward.
//! 3. [`resample()`] converts to the target rate with a band-limited
//!    windowed-sinc interpolator.
//! 4. [`normalize()`] scales the peak to exactly 1.0.
//! 5. [`encode()`] quantizes to unsigned 8-bit PCM, giving an
//!    [`EncodedClip`] that writes a canonical 44-byte-header WAV.
//!
//! # Determinism
//!
//! Every stage is a pure function of its input. The same waveform and
//! configuration produce byte-identical output; [`EncodedClip::pcm_hash`]
//! gives a BLAKE3 digest for comparing renders.
//!
//! # Example
//!
//! ```
//! use droidvoice_backend_audio::{render_waveform, Waveform};
//! use droidvoice_spec::EffectsConfig;
//!
//! let tone: Vec<f64> = (0..22050)
//!     .map(|i| 0.3 * (i as f64 * 0.05).sin())
//!     .collect();
//! let clip = render_waveform(&Waveform::new(tone, 22050), &EffectsConfig::default()).unwrap();
//! assert_eq!(clip.sample_rate(), 16000);
//! let wav = clip.to_wav_bytes();
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

pub mod effects;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod resample;
pub mod source;
pub mod stft;
pub mod wav;
pub mod waveform;

pub use effects::apply_effects;
pub use encode::{encode, quantize_sample, EncodedClip};
pub use error::{AudioError, AudioResult, FailureKind};
pub use normalize::normalize;
pub use pipeline::{render_phrase, render_waveform};
pub use resample::resample;
pub use source::{safe_name, CommandSource, CommandSourceConfig, SpeechSource, WavFileSource};
pub use wav::{decode_wav, read_clip, read_wav};
pub use waveform::Waveform;
