//! finsight-assistant: question answering over a finance snapshot, plus the
//! voice capture/speech lifecycle that feeds it.

pub mod rules;
pub mod voice;

pub use rules::{classify, interpret, interpret_with_rng, Intent, Rule, FALLBACK, RULES, SAVINGS_TIPS};
pub use voice::{
    CaptureEvent, CaptureState, SpeechSettings, SpeechState, VoiceError, VoiceService, VoiceSession,
};
