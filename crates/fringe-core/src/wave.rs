//! Monochromatic wave source and its wavelength-derived quantities.

use crate::error::ExperimentError;
use crate::types::PlausibilityWarning;

/// Speed-of-light approximation used for the frequency (m/s).
const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Default wavelength (m): the red HeNe laser line.
pub const DEFAULT_WAVELENGTH: f64 = 632e-9;

/// Bounds of the typical visible range used by the plausibility check (m).
const VISIBLE_RANGE_MIN: f64 = 100e-9;
const VISIBLE_RANGE_MAX: f64 = 1000e-9;

/// A coherent monochromatic source.
///
/// Holds the wavelength and amplitude, plus the wavenumber
/// $k = 2\pi / \lambda$ and frequency $f = c / \lambda$ derived once at
/// construction. Immutable thereafter.
#[derive(Debug, Clone)]
pub struct WaveSource {
    wavelength: f64,
    amplitude: f64,
    wavenumber: f64,
    frequency: f64,
}

impl WaveSource {
    /// Create a source with unit amplitude.
    ///
    /// Fails if `wavelength` is not strictly positive. A wavelength outside
    /// the typical visible range is accepted but logged as a warning; query
    /// [`WaveSource::plausibility_warning`] for the structured form.
    pub fn new(wavelength: f64) -> Result<Self, ExperimentError> {
        Self::with_amplitude(wavelength, 1.0)
    }

    /// Create a source with an explicit (unitless) amplitude.
    pub fn with_amplitude(wavelength: f64, amplitude: f64) -> Result<Self, ExperimentError> {
        if !(wavelength > 0.0) {
            return Err(ExperimentError::InvalidParameter {
                parameter: "wavelength",
                value: wavelength,
                constraint: "must be positive",
            });
        }

        let source = Self {
            wavelength,
            amplitude,
            wavenumber: 2.0 * std::f64::consts::PI / wavelength,
            frequency: SPEED_OF_LIGHT / wavelength,
        };
        if let Some(warning) = source.plausibility_warning() {
            log::warn!("{}", warning);
        }
        Ok(source)
    }

    /// Wavelength λ (m).
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Amplitude (unitless, 1.0 unless set explicitly).
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Wavenumber $k = 2\pi / \lambda$ (rad/m).
    pub fn wavenumber(&self) -> f64 {
        self.wavenumber
    }

    /// Frequency $f = c / \lambda$ (Hz).
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Phase accumulated after propagating `distance` metres:
    /// $\varphi = k \cdot s$ (radians).
    pub fn phase_at(&self, distance: f64) -> f64 {
        self.wavenumber * distance
    }

    /// Visible-range sanity check. `None` when the wavelength lies within
    /// 100–1000 nm.
    pub fn plausibility_warning(&self) -> Option<PlausibilityWarning> {
        if self.wavelength < VISIBLE_RANGE_MIN || self.wavelength > VISIBLE_RANGE_MAX {
            Some(PlausibilityWarning::WavelengthOutsideVisibleRange {
                wavelength: self.wavelength,
            })
        } else {
            None
        }
    }
}

impl Default for WaveSource {
    /// Unit-amplitude source on the red HeNe line.
    fn default() -> Self {
        Self {
            wavelength: DEFAULT_WAVELENGTH,
            amplitude: 1.0,
            wavenumber: 2.0 * std::f64::consts::PI / DEFAULT_WAVELENGTH,
            frequency: SPEED_OF_LIGHT / DEFAULT_WAVELENGTH,
        }
    }
}
