//! WAV container support.
//!
//! Output is always mono unsigned 8-bit PCM with a canonical 44-byte header
//! and no extra chunks, so identical PCM always produces identical files.
//! Input speech can be any integer or 32-bit float WAV that `hound` reads.

mod format;
mod reader;
mod writer;


pub use format::{WavFormat, WAV_HEADER_LEN};
pub use reader::{decode_wav, read_clip, read_wav};
pub use writer::{wav_bytes, write_wav};
