use std::collections::BTreeMap;

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_channel(
    x_axis: &[f64],
    baseline: f64,
    peaks: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    x_axis
        .iter()
        .map(|&x| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
                .sum();
            baseline + signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Render `x y` rows the way a user would paste them into an editor.
fn to_text(x_axis: &[f64], y: &[f64]) -> String {
    x_axis
        .iter()
        .zip(y)
        .map(|(x, y)| format!("{x} {y:.6}\n"))
        .collect()
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_channels.json".to_string());

    let mut rng = SimpleRng::new(42);

    // Wavelength axis: 400 → 798, step 2
    let x_axis: Vec<f64> = (0..200).map(|i| 400.0 + i as f64 * 2.0).collect();

    let ref_peaks = [(500.0, 40.0, 2.0), (650.0, 30.0, 1.5)];
    let sig_peaks = [(520.0, 35.0, 1.8), (700.0, 25.0, 1.2)];
    // The "_p" measurements carry a small extra absorption band.
    let ref_p_peaks = [(500.0, 40.0, 2.0), (650.0, 30.0, 1.5), (600.0, 15.0, 0.05)];
    let sig_p_peaks = [(520.0, 35.0, 1.8), (700.0, 25.0, 1.2), (600.0, 15.0, -0.05)];

    // Measurement baselines sit 1.0 above their dark level.
    let channels: [(&str, Vec<f64>); 6] = [
        ("DARK_ref", generate_channel(&x_axis, 0.10, &[], 0.002, &mut rng)),
        ("DARK_sig", generate_channel(&x_axis, 0.12, &[], 0.002, &mut rng)),
        ("ref", generate_channel(&x_axis, 1.10, &ref_peaks, 0.005, &mut rng)),
        ("sig", generate_channel(&x_axis, 1.12, &sig_peaks, 0.005, &mut rng)),
        ("ref_p", generate_channel(&x_axis, 1.10, &ref_p_peaks, 0.005, &mut rng)),
        ("sig_p", generate_channel(&x_axis, 1.12, &sig_p_peaks, 0.005, &mut rng)),
    ];

    let document: BTreeMap<&str, String> = channels
        .iter()
        .map(|(name, y)| (*name, to_text(&x_axis, y)))
        .collect();

    let json = serde_json::to_string_pretty(&document).context("serializing document")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} channels ({} samples each) to {output_path}",
        channels.len(),
        x_axis.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_space_separated_pairs() {
        assert_eq!(to_text(&[400.0, 402.0], &[0.5, 1.25]), "400 0.500000\n402 1.250000\n");
    }

    #[test]
    fn generated_channels_are_deterministic() {
        let x_axis = [400.0, 500.0, 600.0];
        let a = generate_channel(&x_axis, 1.0, &[(500.0, 40.0, 2.0)], 0.005, &mut SimpleRng::new(7));
        let b = generate_channel(&x_axis, 1.0, &[(500.0, 40.0, 2.0)], 0.005, &mut SimpleRng::new(7));
        assert_eq!(a, b);
        assert!(a[1] > a[0]);
    }
}
