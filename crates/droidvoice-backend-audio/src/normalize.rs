//! Peak normalization.

use crate::waveform::Waveform;

/// Scales a waveform so its largest absolute sample is exactly 1.0.
///
/// Every sample is divided by the peak, so the peak sample itself lands on
/// exactly ±1.0 and a second pass divides by 1.0 and changes nothing. An
/// all-zero waveform is returned unchanged, as is one with a non-finite peak
/// (the encoder rejects those).
///
/// This must be the last transform before quantization.
pub fn normalize(waveform: &Waveform) -> Waveform {
    let peak = waveform.peak();
    if peak == 0.0 || !peak.is_finite() {
        return waveform.clone();
    }

    let samples = waveform.samples().iter().map(|s| s / peak).collect();
    Waveform::new(samples, waveform.sample_rate())
}
