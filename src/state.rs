use std::collections::BTreeMap;
use std::path::Path;

use crate::color::ChannelColors;
use crate::data::analysis::Analysis;
use crate::data::channel::{Channel, ChannelTexts};
use crate::data::document::Document;
use crate::data::parser::{parse, ParseError, XySeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Raw editor text of every channel.
    pub channels: ChannelTexts,

    /// Parsed preview of each channel, refreshed on edit.
    pub previews: BTreeMap<Channel, Result<XySeries, ParseError>>,

    /// Output of the last successful "Plot" action.
    pub analysis: Option<Analysis>,

    /// Preview line colours.
    pub colors: ChannelColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = Self {
            channels: ChannelTexts::default(),
            previews: BTreeMap::new(),
            analysis: None,
            colors: ChannelColors::default(),
            status_message: None,
        };
        state.refresh_all_previews();
        state
    }
}

impl AppState {
    /// Re-parse one channel after its text changed.
    pub fn refresh_preview(&mut self, channel: Channel) {
        let parsed = parse(self.channels.get(channel));
        if let Err(e) = &parsed {
            log::debug!("Preview of {channel} stopped at line {}: {e}", e.line());
        }
        self.previews.insert(channel, parsed);
    }

    pub fn refresh_all_previews(&mut self) {
        for channel in Channel::ALL {
            self.refresh_preview(channel);
        }
    }

    /// Parse all channels and compute the analysis. On failure the previous
    /// analysis is kept and the error is reported.
    pub fn run_analysis(&mut self) {
        match Analysis::run(&self.channels) {
            Ok(analysis) => {
                log::info!(
                    "Computed analysis over {} samples",
                    analysis.result.len()
                );
                self.status_message = analysis
                    .is_empty()
                    .then(|| "No data to plot: at least one channel is empty.".to_string());
                self.analysis = Some(analysis);
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn save_document(&mut self, path: &Path) {
        match Document::from_texts(&self.channels).save(path) {
            Ok(()) => {
                log::info!("Saved channels to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save document: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Load a document; channels it names replace the editor text.
    pub fn load_document(&mut self, path: &Path) {
        match Document::load(path) {
            Ok(doc) => {
                log::info!(
                    "Loaded {} channels from {}",
                    doc.channels.len(),
                    path.display()
                );
                doc.apply_to(&mut self.channels);
                self.refresh_all_previews();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load document: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn export_csv(&mut self, path: &Path) {
        let Some(analysis) = &self.analysis else {
            self.status_message = Some("Nothing to export: plot first.".into());
            return;
        };
        match analysis.export_csv(path) {
            Ok(()) => {
                log::info!("Exported results to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dark-ratio-state-{}-{name}", std::process::id()))
    }

    fn filled_state() -> AppState {
        let mut state = AppState::default();
        for channel in Channel::ALL {
            let text = match channel {
                Channel::DarkRef | Channel::DarkSig => "1 0\n2 0",
                Channel::Ref | Channel::RefP => "1 5\n2 5",
                Channel::Sig | Channel::SigP => "1 3\n2 3",
            };
            state.channels.set(channel, text);
        }
        state.refresh_all_previews();
        state
    }

    #[test]
    fn previews_track_edits() {
        let mut state = AppState::default();
        assert!(state.previews[&Channel::Ref].as_ref().unwrap().is_empty());

        state.channels.set(Channel::Ref, "1 2\n3 4");
        state.refresh_preview(Channel::Ref);
        assert_eq!(state.previews[&Channel::Ref].as_ref().unwrap().len(), 2);

        state.channels.set(Channel::Ref, "1");
        state.refresh_preview(Channel::Ref);
        assert!(state.previews[&Channel::Ref].is_err());
    }

    #[test]
    fn failed_analysis_keeps_previous_result() {
        let mut state = filled_state();
        state.run_analysis();
        let first = state.analysis.clone().unwrap();
        assert_eq!(first.result.log_values, vec![0.0, 0.0]);
        assert!(state.status_message.is_none());

        state.channels.set(Channel::SigP, "1 x");
        state.run_analysis();
        assert_eq!(state.analysis.as_ref(), Some(&first));
        assert!(state.status_message.as_deref().unwrap().contains("sig_p"));
    }

    #[test]
    fn empty_channels_report_no_data() {
        let mut state = AppState::default();
        state.run_analysis();
        assert!(state.analysis.as_ref().unwrap().is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn failed_load_leaves_channels_unchanged() {
        let mut state = filled_state();
        let before = state.channels.clone();

        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        state.load_document(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(state.channels, before);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn save_and_load_restore_channels() {
        let path = temp_path("doc.json");
        let mut saver = filled_state();
        saver.save_document(&path);

        let mut loader = AppState::default();
        loader.load_document(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loader.channels, saver.channels);
        assert_eq!(loader.previews[&Channel::Sig].as_ref().unwrap().y, vec![3.0, 3.0]);
    }

    #[test]
    fn export_requires_analysis() {
        let mut state = filled_state();
        let path = temp_path("out.csv");
        state.export_csv(&path);
        assert!(state.status_message.is_some());
        assert!(!path.exists());

        state.run_analysis();
        state.export_csv(&path);
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written.lines().count(), 3);
        assert!(state.status_message.is_none());
    }
}
