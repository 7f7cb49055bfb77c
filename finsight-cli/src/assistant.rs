//! Interactive assistant: the terminal stands in for the microphone and speaker.
//!
//! Each typed line is one capture. Ctrl-C cancels listening and speech
//! immediately and ends the session.

use anyhow::Result;
use finsight_assistant::{CaptureEvent, SpeechSettings, VoiceError, VoiceService, VoiceSession};
use finsight_core::Snapshot;
use std::future::Future;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Prompts on stdout; "speaks" by printing.
pub struct ConsoleVoice;

impl VoiceService for ConsoleVoice {
    fn begin_capture(&mut self, _settings: &SpeechSettings) -> Result<(), VoiceError> {
        print!("you> ");
        std::io::stdout()
            .flush()
            .map_err(|e| VoiceError::Device(e.to_string()))
    }

    fn cancel_capture(&mut self) {
        println!();
    }

    fn speak(&mut self, text: &str, settings: &SpeechSettings) -> Result<(), VoiceError> {
        debug!(lang = %settings.lang, rate = settings.rate, "speaking");
        println!("assistant> {text}");
        Ok(())
    }

    fn cancel_speech(&mut self) {}
}

/// Read stdin lines on a plain OS thread.
///
/// The thread is detached: a read blocked on the terminal never holds the
/// process open once the loop has finished.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit" | "bye")
}

/// Why the conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    Quit,
    InputClosed,
    Cancelled,
}

/// One capture per line until quit, end of input, or `cancel` resolves.
async fn converse<V: VoiceService>(
    session: &mut VoiceSession<V>,
    lines: &mut mpsc::UnboundedReceiver<String>,
    cancel: impl Future<Output = ()>,
    snapshot: &Snapshot,
) -> Result<LoopEnd> {
    tokio::pin!(cancel);

    loop {
        session.start_listening()?;

        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    session.stop_listening();
                    return Ok(LoopEnd::InputClosed);
                };
                if is_quit(&line) {
                    session.stop_listening();
                    return Ok(LoopEnd::Quit);
                }
                let event = if line.trim().is_empty() {
                    CaptureEvent::Ended
                } else {
                    CaptureEvent::Transcript(line)
                };
                session.handle_capture(event, snapshot);
                session.speech_finished();
            }
            _ = &mut cancel => {
                session.stop_listening();
                session.stop_speaking();
                return Ok(LoopEnd::Cancelled);
            }
        }
    }
}

pub async fn run_assistant(snapshot: &Snapshot, settings: SpeechSettings) -> Result<()> {
    println!("Ask about your balance, food spending, budgets, savings tips or your last transaction.");
    println!("Type 'exit' or press Ctrl-C to stop.\n");

    let mut session = VoiceSession::new(ConsoleVoice, settings);
    let mut lines = spawn_stdin_reader();

    let end = converse(&mut session, &mut lines, ctrl_c(), snapshot).await?;
    if end == LoopEnd::Cancelled {
        println!("cancelled");
    }
    debug!(?end, "assistant finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use finsight_assistant::{CaptureState, SpeechState};
    use finsight_core::seed_snapshot;

    #[derive(Default)]
    struct Recorder {
        spoken: Vec<String>,
    }

    impl VoiceService for Recorder {
        fn begin_capture(&mut self, _settings: &SpeechSettings) -> Result<(), VoiceError> {
            Ok(())
        }
        fn cancel_capture(&mut self) {}
        fn speak(&mut self, text: &str, _settings: &SpeechSettings) -> Result<(), VoiceError> {
            self.spoken.push(text.to_string());
            Ok(())
        }
        fn cancel_speech(&mut self) {}
    }

    fn session() -> VoiceSession<Recorder> {
        VoiceSession::new(Recorder::default(), SpeechSettings::default())
    }

    #[test]
    fn test_quit_words() {
        assert!(is_quit(" Exit "));
        assert!(is_quit("bye"));
        assert!(!is_quit("what's my balance"));
    }

    #[tokio::test]
    async fn test_answers_until_quit() {
        let snap = seed_snapshot(Utc::now());
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send("what's my balance".to_string()).unwrap();
        tx.send(String::new()).unwrap();
        tx.send("exit".to_string()).unwrap();

        let mut s = session();
        let end = converse(&mut s, &mut rx, std::future::pending(), &snap).await.unwrap();
        assert_eq!(end, LoopEnd::Quit);
        assert_eq!(s.service().spoken, vec!["Your total balance is ₹1,12,500"]);
        assert_eq!(s.capture_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn test_closed_input_ends_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        drop(tx);
        let mut s = session();
        let end = converse(&mut s, &mut rx, std::future::pending(), &Snapshot::default())
            .await
            .unwrap();
        assert_eq!(end, LoopEnd::InputClosed);
    }

    #[tokio::test]
    async fn test_cancel_returns_while_input_is_still_open() {
        // sender kept alive: no line will ever arrive
        let (_tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut s = session();
        let end = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            converse(&mut s, &mut rx, std::future::ready(()), &Snapshot::default()),
        )
        .await
        .expect("cancel ends the loop")
        .unwrap();
        assert_eq!(end, LoopEnd::Cancelled);
        assert_eq!(s.capture_state(), CaptureState::Idle);
        assert_eq!(s.speech_state(), SpeechState::Idle);
        assert!(s.service().spoken.is_empty());
    }
}
