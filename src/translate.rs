//! Image text extraction and translation
//!
//! The OCR and translation work happens in an external script; this module
//! owns the process invocation and the interpretation of its output.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::config::TranslationConfig;
use crate::{Result, TripweaveError};

/// Target language used when the caller does not pick one
pub const DEFAULT_TARGET_LANG: &str = "en";

/// Extracts the text in an image and translates it
#[async_trait]
pub trait ImageTranslator: Send + Sync {
    async fn translate(&self, image_path: &Path, target_lang: &str) -> Result<String>;
}

/// Output printed by the translation script
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptOutput {
    Failure { error: String },
    Success { translated: String },
}

/// Runs `<interpreter> <script> <image_path> <target_lang>`
#[derive(Debug, Clone)]
pub struct ScriptTranslator {
    interpreter: String,
    script: PathBuf,
}

impl ScriptTranslator {
    #[must_use]
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            script: PathBuf::from(&config.script),
        }
    }
}

#[async_trait]
impl ImageTranslator for ScriptTranslator {
    #[instrument(skip(self), fields(script = %self.script.display()))]
    async fn translate(&self, image_path: &Path, target_lang: &str) -> Result<String> {
        if image_path.as_os_str().is_empty() || !image_path.exists() {
            return Err(TripweaveError::precondition(format!(
                "No image uploaded: {}",
                image_path.display()
            )));
        }

        let target_lang = if target_lang.trim().is_empty() {
            DEFAULT_TARGET_LANG
        } else {
            target_lang
        };

        debug!("Running {} {}", self.interpreter, self.script.display());
        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg(image_path)
            .arg(target_lang)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let detail = match parse_output(&stdout) {
                Some(ScriptOutput::Failure { error }) => error,
                _ => String::from_utf8_lossy(&output.stderr).trim().to_string(),
            };
            warn!("Translation script exited with {}", output.status);
            return Err(TripweaveError::provider(format!(
                "Translation failed ({}): {detail}",
                output.status
            )));
        }

        let translated = match parse_output(&stdout) {
            Some(ScriptOutput::Success { translated, .. }) => translated,
            Some(ScriptOutput::Failure { error }) => {
                return Err(TripweaveError::provider(format!(
                    "Translation failed: {error}"
                )));
            }
            None => stdout.trim().to_string(),
        };

        if translated.is_empty() {
            return Err(TripweaveError::provider(
                "Translation failed: script produced no output",
            ));
        }

        info!("Translated image text ({} chars)", translated.len());
        Ok(translated)
    }
}

fn parse_output(stdout: &str) -> Option<ScriptOutput> {
    serde_json::from_str(stdout.trim()).ok()
}
