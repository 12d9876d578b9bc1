//! Pure text heuristics.
//!
//! Stress scoring, suggestion generation, voice-transcript parsing and the
//! rewrite helpers (cleanup, title/description splitting, local fallback).
//! Everything in here is deterministic, does no I/O and holds no state.

mod rewrite;
mod stress;
mod suggest;
mod textpos;
mod voice;

pub use rewrite::{
    clean_rewritten, fallback_rewrite, split_rewritten, truncate_title, FALLBACK_MARKER,
};
pub use stress::stress_score;
pub use suggest::suggestions;
pub use voice::{parse_voice_transcript, VoiceTask};
