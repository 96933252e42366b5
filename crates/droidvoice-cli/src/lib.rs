//! DroidVoice CLI library.
//!
//! Provides configuration loading, speech source selection and the
//! command implementations behind the `droidvoice` binary.

pub mod commands;
pub mod input;
