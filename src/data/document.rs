use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::channel::{Channel, ChannelTexts};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document: {0}")]
    Format(String),
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Format(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Document – the saved raw text of each channel
// ---------------------------------------------------------------------------

/// Saved JSON schema:
///
/// ```json
/// {
///   "DARK_ref": "400 0.12\n401 0.13\n",
///   "DARK_sig": "...",
///   "ref": "...",
///   ...
/// }
/// ```
///
/// Values are the editor contents verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub channels: BTreeMap<Channel, String>,
}

impl Document {
    pub fn from_texts(texts: &ChannelTexts) -> Self {
        Self {
            channels: texts.iter().map(|(c, t)| (c, t.to_string())).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.channels)?)
    }

    /// Parse a document. Unknown keys are skipped; known keys must hold strings.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let root: JsonValue = serde_json::from_str(text)?;
        let obj = root
            .as_object()
            .ok_or_else(|| DocumentError::Format("expected a top-level JSON object".into()))?;

        let mut channels = BTreeMap::new();
        for (key, value) in obj {
            let Some(channel) = Channel::from_name(key) else {
                log::warn!("Ignoring unknown channel {key:?} in document");
                continue;
            };
            let text = value.as_str().ok_or_else(|| {
                DocumentError::Format(format!("channel {channel}: expected a string"))
            })?;
            channels.insert(channel, text.to_string());
        }

        Ok(Self { channels })
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Overwrite the channels present in this document; others keep their text.
    pub fn apply_to(&self, texts: &mut ChannelTexts) {
        for (channel, text) in &self.channels {
            texts.set(*channel, text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dark-ratio-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn save_then_load_reproduces_text() {
        let mut texts = ChannelTexts::default();
        texts.set(Channel::DarkRef, "400 0.1\n401 0.2\n");
        texts.set(Channel::Sig, "  1\t2  \r\n\n3 4");
        texts.set(Channel::RefP, "\"quoted\" \\ 測定 ✓");

        let path = temp_path("round-trip");
        Document::from_texts(&texts).save(&path).unwrap();
        let loaded = Document::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut restored = ChannelTexts::default();
        restored.set(Channel::Ref, "stale");
        loaded.apply_to(&mut restored);
        assert_eq!(restored, texts);
    }

    #[test]
    fn writes_channel_names_as_keys() {
        let mut texts = ChannelTexts::default();
        texts.set(Channel::DarkSig, "1 2");
        let json = Document::from_texts(&texts).to_json().unwrap();
        let value: JsonValue = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        assert_eq!(obj["DARK_sig"], "1 2");
        assert_eq!(obj["sig_p"], "");
    }

    #[test]
    fn partial_document_keeps_other_channels() {
        let doc = Document::from_json(r#"{"ref": "5 5", "extra": 1}"#).unwrap();
        assert_eq!(doc.channels.len(), 1);

        let mut texts = ChannelTexts::default();
        texts.set(Channel::Sig, "3 3");
        doc.apply_to(&mut texts);
        assert_eq!(texts.get(Channel::Ref), "5 5");
        assert_eq!(texts.get(Channel::Sig), "3 3");
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            Document::from_json("not json"),
            Err(DocumentError::Format(_))
        ));
        assert!(matches!(
            Document::from_json("[1, 2]"),
            Err(DocumentError::Format(_))
        ));
        assert!(matches!(
            Document::from_json(r#"{"sig": 3}"#),
            Err(DocumentError::Format(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = temp_path("does-not-exist");
        assert!(matches!(
            Document::load(&path),
            Err(DocumentError::Io { .. })
        ));
    }
}
