use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tango_types::RecognizedLine;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::datauri::DataUri;
use crate::engine::{Progress, ProgressFn, RECOGNIZING_TEXT, RecognitionEngine, RecognitionOutput};
use crate::error::OcrError;

/// Drives the `tesseract` command line program
pub struct TesseractEngine {
    binary: PathBuf,
    loaded: bool,
    available: Vec<String>,
    language: Option<String>,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            loaded: false,
            available: Vec::new(),
            language: None,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} {:?} exited with {}: {}",
                self.binary.display(),
                args,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // Older builds print --version and --list-langs on stderr
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    async fn run_tsv(&self, image: &[u8], language: &str) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", language, "tsv"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.binary.display()))?;

        let mut stdin = child.stdin.take().context("tesseract stdin unavailable")?;
        stdin
            .write_all(image)
            .await
            .context("Failed to write image to tesseract")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for tesseract")?;

        if !output.status.success() {
            anyhow::bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("tesseract produced invalid UTF-8")
    }
}

#[async_trait]
impl RecognitionEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn load(&mut self) -> Result<(), OcrError> {
        let version = self
            .run(&["--version"])
            .await
            .map_err(|e| OcrError::InitFailure(format!("{e:#}")))?;

        tracing::info!(
            "Found {}",
            version.lines().next().unwrap_or("tesseract").trim()
        );
        self.loaded = true;
        Ok(())
    }

    async fn load_language(&mut self, language: &str) -> Result<(), OcrError> {
        if !self.loaded {
            return Err(OcrError::InitFailure("engine not loaded".to_string()));
        }

        let listing = self
            .run(&["--list-langs"])
            .await
            .map_err(|e| OcrError::InitFailure(format!("{e:#}")))?;

        // First line is a "List of available languages ..." header
        self.available = listing
            .lines()
            .skip(1)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        // "jpn+eng" needs every part installed
        let missing: Vec<&str> = language
            .split('+')
            .filter(|part| !self.available.iter().any(|a| a == part))
            .collect();

        if !missing.is_empty() {
            return Err(OcrError::InitFailure(format!(
                "language model(s) not installed: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    async fn initialize(&mut self, language: &str) -> Result<(), OcrError> {
        self.language = Some(language.to_string());
        Ok(())
    }

    async fn recognize(
        &self,
        image: &DataUri,
        progress: &ProgressFn,
    ) -> Result<RecognitionOutput, OcrError> {
        let language = self
            .language
            .as_deref()
            .ok_or_else(|| OcrError::RecognitionFailure("engine not initialized".to_string()))?;

        progress(Progress::new(RECOGNIZING_TEXT, 0.0));
        let tsv = self
            .run_tsv(image.bytes(), language)
            .await
            .map_err(|e| OcrError::RecognitionFailure(format!("{e:#}")))?;
        progress(Progress::new(RECOGNIZING_TEXT, 1.0));

        let lines = parse_tsv(&tsv);
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(RecognitionOutput { lines, text })
    }
}

/// Group tesseract TSV word rows into lines.
///
/// Words are joined with a single space; line confidence is the mean of its
/// word confidences.
pub fn parse_tsv(tsv: &str) -> Vec<RecognizedLine> {
    struct Pending {
        key: (u32, u32, u32, u32),
        words: Vec<String>,
        confidence_sum: f32,
    }

    fn finish(pending: Pending, out: &mut Vec<RecognizedLine>) {
        if pending.words.is_empty() {
            return;
        }
        out.push(RecognizedLine {
            confidence: pending.confidence_sum / pending.words.len() as f32,
            text: pending.words.join(" "),
        });
    }

    let mut lines = Vec::new();
    let mut current: Option<Pending> = None;

    // level page block par line word left top width height conf text
    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.splitn(12, '\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }

        let ids: Vec<u32> = cols[1..5].iter().filter_map(|c| c.parse().ok()).collect();
        let Ok(confidence) = cols[10].trim().parse::<f32>() else {
            continue;
        };
        let word = cols[11].trim();
        if ids.len() != 4 || confidence < 0.0 || word.is_empty() {
            continue;
        }

        let key = (ids[0], ids[1], ids[2], ids[3]);
        match current.as_mut() {
            Some(pending) if pending.key == key => {
                pending.words.push(word.to_string());
                pending.confidence_sum += confidence;
            }
            _ => {
                if let Some(done) = current.take() {
                    finish(done, &mut lines);
                }
                current = Some(Pending {
                    key,
                    words: vec![word.to_string()],
                    confidence_sum: confidence,
                });
            }
        }
    }

    if let Some(done) = current {
        finish(done, &mut lines);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn groups_words_by_line() {
        let input = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t",
            "4\t1\t1\t1\t1\t0\t10\t10\t300\t30\t-1\t",
            "5\t1\t1\t1\t1\t1\t10\t10\t80\t30\t90\t食べる",
            "5\t1\t1\t1\t1\t2\t100\t10\t80\t30\t70\tたべる",
            "5\t1\t1\t1\t2\t1\t10\t50\t40\t30\t20.5\t猫",
        ]);

        let lines = parse_tsv(&input);
        assert_eq!(
            lines,
            vec![
                RecognizedLine {
                    text: "食べる たべる".to_string(),
                    confidence: 80.0
                },
                RecognizedLine {
                    text: "猫".to_string(),
                    confidence: 20.5
                },
            ]
        );
    }

    #[test]
    fn skips_blank_words_and_garbage_rows() {
        let input = tsv(&[
            "5\t1\t1\t1\t1\t1\t0\t0\t1\t1\t95\t ",
            "not a row",
            "5\t1\t1\t1\t1\t2\t0\t0\t1\t1\tNaNish\t本",
            "5\t1\t1\t1\t1\t3\t0\t0\t1\t1\t60\t本",
        ]);

        let lines = parse_tsv(&input);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "本");
        assert_eq!(lines[0].confidence, 60.0);
    }

    #[test]
    fn empty_output_has_no_lines() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv(HEADER).is_empty());
    }

    #[tokio::test]
    async fn missing_binary_fails_setup() {
        let mut engine = TesseractEngine::new("/nonexistent/tesseract-binary");
        assert!(matches!(engine.load().await, Err(OcrError::InitFailure(_))));
        assert!(matches!(
            engine.load_language("jpn").await,
            Err(OcrError::InitFailure(_))
        ));
    }

    #[tokio::test]
    async fn recognize_before_initialize_fails() {
        let engine = TesseractEngine::new("tesseract");
        let image = DataUri::new("image/png", vec![1, 2, 3]);
        let result = engine.recognize(&image, &|_: Progress| {}).await;
        assert!(matches!(result, Err(OcrError::RecognitionFailure(_))));
    }
}
