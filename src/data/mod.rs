/// Data layer: channel model, parsing, calculation and persistence.
///
/// Architecture:
/// ```text
///  six channel editors (raw text)
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  "x y" rows → XySeries
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ calculator  │  dark-corrected diffs + log ratio
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analysis  │  shared x axis, CSV export
///   └──────────┘
///
///  document: raw text of every channel ⇄ .json
/// ```

pub mod analysis;
pub mod calculator;
pub mod channel;
pub mod document;
pub mod parser;
