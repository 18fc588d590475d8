use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::calculator::{compute, CalculatorInput, CalculatorResult};
use super::channel::{Channel, ChannelTexts};
use super::parser::{parse, ParseError};

/// Legend label of the log-ratio series.
pub const LOG_LABEL: &str =
    "LOG((ref_p - DARK_ref) * (sig - DARK_sig) / (sig_p - DARK_sig) / (ref - DARK_ref))";

pub const DIFF_REF_LABEL: &str = "ref - DARK_ref";
pub const DIFF_SIG_LABEL: &str = "sig - DARK_sig";
pub const DIFF_REF_P_LABEL: &str = "ref_p - DARK_ref";
pub const DIFF_SIG_P_LABEL: &str = "sig_p - DARK_sig";

/// A parse failure attributed to the channel it came from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("channel {channel}: {source}")]
pub struct ChannelError {
    pub channel: Channel,
    #[source]
    pub source: ParseError,
}

// ---------------------------------------------------------------------------
// Analysis – parsed channels + calculator output on a shared x axis
// ---------------------------------------------------------------------------

/// Result of one "Plot" action.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// x values of `DARK_ref`, reused for every output chart.
    pub x: Vec<f64>,
    pub result: CalculatorResult,
}

impl Analysis {
    /// Parse every channel and run the calculator. The first malformed
    /// channel (in canonical order) aborts the run.
    pub fn run(texts: &ChannelTexts) -> Result<Self, ChannelError> {
        let parse_channel = |channel: Channel| {
            parse(texts.get(channel)).map_err(|source| ChannelError { channel, source })
        };
        let dark_ref = parse_channel(Channel::DarkRef)?;
        let dark_sig = parse_channel(Channel::DarkSig)?;
        let reference = parse_channel(Channel::Ref)?;
        let signal = parse_channel(Channel::Sig)?;
        let reference_p = parse_channel(Channel::RefP)?;
        let signal_p = parse_channel(Channel::SigP)?;

        let result = compute(CalculatorInput {
            dark_ref: &dark_ref.y,
            dark_sig: &dark_sig.y,
            reference: &reference.y,
            signal: &signal.y,
            reference_p: &reference_p.y,
            signal_p: &signal_p.y,
        });

        Ok(Self {
            x: dark_ref.x,
            result,
        })
    }

    /// Pair the shared x axis with a result series by position.
    pub fn points(&self, values: &[f64]) -> Vec<[f64; 2]> {
        self.x.iter().zip(values).map(|(&x, &y)| [x, y]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Write the result table as CSV, one row per sample position.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "x",
            DIFF_REF_LABEL,
            DIFF_SIG_LABEL,
            DIFF_REF_P_LABEL,
            DIFF_SIG_P_LABEL,
            "log",
        ])
        .context("writing CSV header")?;

        let r = &self.result;
        for (i, x) in self.x.iter().take(r.len()).enumerate() {
            wtr.write_record(
                [
                    *x,
                    r.diff_ref[i],
                    r.diff_sig[i],
                    r.diff_ref_p[i],
                    r.diff_sig_p[i],
                    r.log_values[i],
                ]
                .iter()
                .map(|v| v.to_string()),
            )
            .with_context(|| format!("writing CSV row {i}"))?;
        }
        wtr.flush().context("flushing CSV output")?;
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        self.write_csv(file)
    }
}
