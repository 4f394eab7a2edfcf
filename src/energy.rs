//! Frequency-band energy state with heavy exponential smoothing.
//!
//! The external audio adapter delivers three raw band energies per frame.
//! Smoothed values drive all animation; raw values are kept one frame back
//! for transient (instrument-onset) detection only.

use crate::noise::lerp;

/// Upper bound of the band energy scale delivered by the audio adapter
pub const BAND_MAX: f32 = 255.0;

/// One frame of raw band-energy readings from the audio adapter
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandSample {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl BandSample {
    pub fn new(bass: f32, mid: f32, treble: f32) -> Self {
        Self { bass, mid, treble }
    }
}

/// Frequency band identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

/// Smoothed and raw band energies, updated once per playing frame
#[derive(Clone, Copy, Debug, Default)]
pub struct EnergyState {
    raw: BandSample,
    previous_raw: BandSample,
    pub smoothed_bass: f32,
    pub smoothed_mid: f32,
    pub smoothed_treble: f32,
}

impl EnergyState {
    /// Ingest one frame of raw readings and advance the smoothed values.
    ///
    /// Raw values are clamped to [0, BAND_MAX]; the previous frame's raw
    /// values are retained for onset detection.
    pub fn update(&mut self, sample: BandSample, alpha: f32) {
        self.previous_raw = self.raw;
        self.raw = BandSample {
            bass: sample.bass.clamp(0.0, BAND_MAX),
            mid: sample.mid.clamp(0.0, BAND_MAX),
            treble: sample.treble.clamp(0.0, BAND_MAX),
        };

        self.smoothed_bass = lerp(self.smoothed_bass, self.raw.bass, alpha);
        self.smoothed_mid = lerp(self.smoothed_mid, self.raw.mid, alpha);
        self.smoothed_treble = lerp(self.smoothed_treble, self.raw.treble, alpha);
    }

    /// Current frame's raw readings
    pub fn raw(&self) -> BandSample {
        self.raw
    }

    /// Smoothed value for one band
    pub fn smoothed(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.smoothed_bass,
            Band::Mid => self.smoothed_mid,
            Band::Treble => self.smoothed_treble,
        }
    }

    /// Sum of the three smoothed bands, in [0, 3 * BAND_MAX]
    pub fn total_smoothed(&self) -> f32 {
        self.smoothed_bass + self.smoothed_mid + self.smoothed_treble
    }

    /// Bands whose raw energy rose by more than `threshold` since last frame
    pub fn onsets(&self, threshold: f32) -> Vec<Band> {
        let mut bands = Vec::new();
        if self.raw.bass - self.previous_raw.bass > threshold {
            bands.push(Band::Bass);
        }
        if self.raw.mid - self.previous_raw.mid > threshold {
            bands.push(Band::Mid);
        }
        if self.raw.treble - self.previous_raw.treble > threshold {
            bands.push(Band::Treble);
        }
        bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_converges_monotonically() {
        let mut energy = EnergyState::default();
        let mut previous = 0.0_f32;

        // Smoothed value must stay between its previous value and the new raw value
        for raw in [200.0, 180.0, 50.0, 255.0, 0.0, 130.0] {
            energy.update(BandSample::new(raw, 0.0, 0.0), 0.04);
            let smoothed = energy.smoothed_bass;
            assert!(smoothed >= previous.min(raw) && smoothed <= previous.max(raw));
            previous = smoothed;
        }
    }

    #[test]
    fn test_smoothed_lags_raw() {
        let mut energy = EnergyState::default();
        energy.update(BandSample::new(255.0, 255.0, 255.0), 0.04);

        assert!(energy.smoothed_bass < 255.0);
        assert!((energy.smoothed_bass - 255.0 * 0.04).abs() < 1e-3);
    }

    #[test]
    fn test_raw_values_clamped() {
        let mut energy = EnergyState::default();
        energy.update(BandSample::new(-10.0, 400.0, 128.0), 0.04);

        assert_eq!(energy.raw().bass, 0.0);
        assert_eq!(energy.raw().mid, BAND_MAX);
        assert_eq!(energy.raw().treble, 128.0);
    }

    #[test]
    fn test_onset_detection_threshold() {
        let mut energy = EnergyState::default();
        energy.update(BandSample::new(100.0, 100.0, 100.0), 0.04);
        assert_eq!(energy.onsets(80.0), vec![Band::Bass, Band::Mid, Band::Treble]);

        // Steady energies: no onsets
        energy.update(BandSample::new(100.0, 100.0, 100.0), 0.04);
        assert!(energy.onsets(80.0).is_empty());

        // Only the bass rise exceeds the threshold
        energy.update(BandSample::new(190.0, 150.0, 20.0), 0.04);
        assert_eq!(energy.onsets(80.0), vec![Band::Bass]);

        // A drop never counts as an onset
        energy.update(BandSample::new(10.0, 150.0, 20.0), 0.04);
        assert!(energy.onsets(80.0).is_empty());
    }

    #[test]
    fn test_alpha_one_tracks_raw_exactly() {
        let mut energy = EnergyState::default();
        energy.update(BandSample::new(42.0, 84.0, 126.0), 1.0);

        assert_eq!(energy.smoothed_bass, 42.0);
        assert_eq!(energy.smoothed_mid, 84.0);
        assert_eq!(energy.smoothed_treble, 126.0);
    }
}
