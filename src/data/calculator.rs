// ---------------------------------------------------------------------------
// Channel calculator – dark-corrected differences and log ratio
// ---------------------------------------------------------------------------

/// The y-series of the six channels, borrowed from the parsed input.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorInput<'a> {
    pub dark_ref: &'a [f64],
    pub dark_sig: &'a [f64],
    pub reference: &'a [f64],
    pub signal: &'a [f64],
    pub reference_p: &'a [f64],
    pub signal_p: &'a [f64],
}

impl CalculatorInput<'_> {
    /// Length of the shortest input; every result series has this length.
    pub fn common_len(&self) -> usize {
        [
            self.dark_ref,
            self.dark_sig,
            self.reference,
            self.signal,
            self.reference_p,
            self.signal_p,
        ]
        .iter()
        .map(|s| s.len())
        .min()
        .unwrap_or(0)
    }
}

/// Position-aligned output of [`compute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorResult {
    /// `ref - DARK_ref`
    pub diff_ref: Vec<f64>,
    /// `sig - DARK_sig`
    pub diff_sig: Vec<f64>,
    /// `ref_p - DARK_ref`
    pub diff_ref_p: Vec<f64>,
    /// `sig_p - DARK_sig`
    pub diff_sig_p: Vec<f64>,
    /// `ln(diff_ref_p * diff_sig / (diff_sig_p * diff_ref))`, NaN where undefined.
    pub log_values: Vec<f64>,
}

impl CalculatorResult {
    pub fn len(&self) -> usize {
        self.log_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_values.is_empty()
    }
}

/// Log ratio of one sample position.
///
/// NaN when `diff_ref` or `diff_sig_p` is zero, or when the ratio is negative.
pub fn log_ratio(diff_ref: f64, diff_sig: f64, diff_ref_p: f64, diff_sig_p: f64) -> f64 {
    if diff_ref == 0.0 || diff_sig_p == 0.0 {
        return f64::NAN;
    }
    ((diff_ref_p * diff_sig) / (diff_sig_p * diff_ref)).ln()
}

/// Combine the six channels position by position, truncating to the
/// shortest input.
pub fn compute(input: CalculatorInput<'_>) -> CalculatorResult {
    let n = input.common_len();
    let mut out = CalculatorResult {
        diff_ref: Vec::with_capacity(n),
        diff_sig: Vec::with_capacity(n),
        diff_ref_p: Vec::with_capacity(n),
        diff_sig_p: Vec::with_capacity(n),
        log_values: Vec::with_capacity(n),
    };

    for i in 0..n {
        let diff_ref = input.reference[i] - input.dark_ref[i];
        let diff_sig = input.signal[i] - input.dark_sig[i];
        let diff_ref_p = input.reference_p[i] - input.dark_ref[i];
        let diff_sig_p = input.signal_p[i] - input.dark_sig[i];

        out.diff_ref.push(diff_ref);
        out.diff_sig.push(diff_sig);
        out.diff_ref_p.push(diff_ref_p);
        out.diff_sig_p.push(diff_sig_p);
        out.log_values
            .push(log_ratio(diff_ref, diff_sig, diff_ref_p, diff_sig_p));
    }

    out
}
