//! Voice capture and speech lifecycle around an injectable speech backend.
//!
//! Capture:  Idle -> Listening -> (result | error | cancel) -> Idle
//! Speech:   Idle -> Speaking -> (finished | cancel) -> Idle
//!
//! The two machines are independent. Cancellation is immediate: the backend is
//! told to stop and the state drops back to Idle without waiting for it.

use finsight_core::Snapshot;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::rules::interpret_with_rng;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("speech recognition not supported")]
    Unsupported,
    #[error("speech device error: {0}")]
    Device(String),
}

/// Voice parameters handed to the synthesizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeechSettings {
    pub lang: String,
    pub rate: f64,
    pub pitch: f64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            lang: "en-IN".to_string(),
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// Speech capabilities provided by the platform (or a fake in tests).
///
/// `begin_capture` only starts listening; the transcript arrives later as a
/// [`CaptureEvent`] fed to [`VoiceSession::handle_capture`].
pub trait VoiceService {
    fn begin_capture(&mut self, settings: &SpeechSettings) -> Result<(), VoiceError>;
    fn cancel_capture(&mut self);
    fn speak(&mut self, text: &str, settings: &SpeechSettings) -> Result<(), VoiceError>;
    fn cancel_speech(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptureState {
    Idle,
    Listening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeechState {
    Idle,
    Speaking,
}

/// What the recognizer reported for the current capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    Transcript(String),
    Error(String),
    /// Capture ended without a transcript
    Ended,
}

pub struct VoiceSession<V> {
    service: V,
    settings: SpeechSettings,
    capture: CaptureState,
    speech: SpeechState,
    transcript: Option<String>,
    response: Option<String>,
}

impl<V: VoiceService> VoiceSession<V> {
    pub fn new(service: V, settings: SpeechSettings) -> Self {
        Self {
            service,
            settings,
            capture: CaptureState::Idle,
            speech: SpeechState::Idle,
            transcript: None,
            response: None,
        }
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn speech_state(&self) -> SpeechState {
        self.speech
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn service(&self) -> &V {
        &self.service
    }

    /// Begin listening. Already listening is a no-op.
    pub fn start_listening(&mut self) -> Result<(), VoiceError> {
        if self.capture == CaptureState::Listening {
            debug!("start_listening ignored: already listening");
            return Ok(());
        }
        self.service.begin_capture(&self.settings)?;
        self.capture = CaptureState::Listening;
        self.transcript = None;
        self.response = None;
        info!("listening");
        Ok(())
    }

    pub fn stop_listening(&mut self) {
        if self.capture == CaptureState::Listening {
            self.service.cancel_capture();
            self.capture = CaptureState::Idle;
            info!("listening cancelled");
        }
    }

    /// Feed a recognizer event. A transcript is answered from `snapshot` and
    /// the answer is spoken; the answer is returned.
    ///
    /// Events that arrive while not listening (e.g. after a cancel) are dropped.
    pub fn handle_capture(&mut self, event: CaptureEvent, snapshot: &Snapshot) -> Option<String> {
        self.handle_capture_with_rng(event, snapshot, &mut rand::thread_rng())
    }

    pub fn handle_capture_with_rng<R: RngCore>(
        &mut self,
        event: CaptureEvent,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Option<String> {
        if self.capture != CaptureState::Listening {
            debug!(?event, "dropping capture event: not listening");
            return None;
        }
        self.capture = CaptureState::Idle;

        match event {
            CaptureEvent::Transcript(text) => {
                let response = interpret_with_rng(&text, snapshot, rng);
                self.transcript = Some(text);
                self.response = Some(response.clone());
                if let Err(e) = self.speak(&response) {
                    warn!(error = %e, "could not speak response");
                }
                Some(response)
            }
            CaptureEvent::Error(e) => {
                warn!(error = %e, "speech recognition error");
                None
            }
            CaptureEvent::Ended => None,
        }
    }

    /// Speak `text`, cutting off anything already being spoken.
    pub fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        if self.speech == SpeechState::Speaking {
            self.service.cancel_speech();
            self.speech = SpeechState::Idle;
        }
        self.service.speak(text, &self.settings)?;
        self.speech = SpeechState::Speaking;
        Ok(())
    }

    pub fn stop_speaking(&mut self) {
        if self.speech == SpeechState::Speaking {
            self.service.cancel_speech();
            self.speech = SpeechState::Idle;
            info!("speech cancelled");
        }
    }

    /// The backend finished the current utterance.
    pub fn speech_finished(&mut self) {
        self.speech = SpeechState::Idle;
    }
}
