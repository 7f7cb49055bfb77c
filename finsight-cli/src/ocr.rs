//! Text recognition through the `tesseract` command-line tool.

use finsight_ingest::{RecognitionError, TextRecognizer};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

pub struct TesseractRecognizer {
    bin: PathBuf,
    lang: String,
}

impl TesseractRecognizer {
    /// Find `tesseract` on PATH.
    pub fn locate(lang: &str) -> Result<Self, RecognitionError> {
        let bin = which::which("tesseract")
            .map_err(|e| RecognitionError::Unavailable(format!("tesseract not found on PATH ({e})")))?;
        debug!(bin = %bin.display(), lang, "using tesseract");
        Ok(Self {
            bin,
            lang: lang.to_string(),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<String, RecognitionError> {
        let mut child = Command::new(&self.bin)
            .args(["stdin", "stdout", "-l", &self.lang])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RecognitionError::Unavailable(format!("spawning tesseract: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image)
                .map_err(|e| RecognitionError::Failed(format!("writing image to tesseract: {e}")))?;
        }

        let out = child
            .wait_with_output()
            .map_err(|e| RecognitionError::Failed(format!("waiting for tesseract: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(RecognitionError::Failed(format!(
                "tesseract exited with {}: {}",
                out.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
