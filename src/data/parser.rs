use thiserror::Error;

// ---------------------------------------------------------------------------
// XySeries – parsed (x, y) pairs of one channel
// ---------------------------------------------------------------------------

/// Ordered (x, y) samples, one per non-empty input line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XySeries {
    pub x: Vec<f64>,
    /// Same length as `x`.
    pub y: Vec<f64>,
}

impl XySeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `[x, y]` pairs, ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }
}

/// A malformed row. Line numbers are 1-based and count blank lines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: expected two columns, got {content:?}")]
    MissingColumn { line: usize, content: String },
    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingColumn { line, .. } | ParseError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Parse whitespace-separated `x y` rows.
///
/// Blank lines are skipped and columns after the second are ignored. The
/// first malformed row aborts the parse.
pub fn parse(text: &str) -> Result<XySeries, ParseError> {
    let mut series = XySeries::default();

    for (idx, line) in split_rows(text).enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();
        let Some(x_tok) = tokens.next() else {
            continue;
        };
        let y_tok = tokens.next().ok_or_else(|| ParseError::MissingColumn {
            line: line_no,
            content: line.trim().to_string(),
        })?;

        series.x.push(parse_number(x_tok, line_no)?);
        series.y.push(parse_number(y_tok, line_no)?);
    }

    Ok(series)
}

/// Split on `\n`, `\r\n` or a lone `\r`; `\r\n` counts as one break.
fn split_rows(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                let width = if s[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[i + width..]);
                Some(&s[..i])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

fn parse_number(token: &str, line: usize) -> Result<f64, ParseError> {
    token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
