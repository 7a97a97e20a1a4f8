//! First-order radio energy model.
//!
//! Transmitting `k` bits over distance `d` costs electronics energy plus an
//! amplifier term whose path-loss exponent switches at the threshold
//! distance `d0 = sqrt(e_fs / e_mp)`:
//!
//! ```text
//! E_tx(k, d) = k·e_elec + k·e_fs·d²   if d <  d0   (free space)
//!            = k·e_elec + k·e_mp·d⁴   if d >= d0   (multipath)
//! E_rx(k)    = k·e_elec
//! E_da(k)    = k·e_agg
//! ```
//!
//! These three primitives are the whole energy law; two-tier accounting in
//! [`crate::placement`] only composes them.
//!
//! # References
//!
//! - Heinzelman, Chandrakasan & Balakrishnan (2002), "An application-specific
//!   protocol architecture for wireless microsensor networks"

use crate::error::{PlacementError, Result};

/// Radio model parameters.
///
/// Units: `e_*` in J/bit (or J/bit/m² and J/bit/m⁴ for the amplifier
/// coefficients), `packet_bits` in bits, `e_init` in joules.
///
/// # Examples
///
/// ```
/// use u_wban::energy::EnergyParams;
///
/// let params = EnergyParams::default()
///     .with_packet_bits(2000)
///     .with_beta_agg(0.5);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyParams {
    /// Electronics energy per bit (TX and RX circuitry).
    pub e_elec: f64,

    /// Free-space amplifier coefficient (d² regime).
    pub e_fs: f64,

    /// Multipath amplifier coefficient (d⁴ regime).
    pub e_mp: f64,

    /// Data aggregation energy per bit.
    pub e_agg: f64,

    /// Bits per sensor packet.
    pub packet_bits: u64,

    /// Fraction of combined member traffic a cluster-head forwards after
    /// aggregation. `1.0` means no compression.
    pub beta_agg: f64,

    /// Initial node energy. Carried for reporting; not part of the cost.
    pub e_init: f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            e_elec: 50e-9,
            e_fs: 10e-12,
            e_mp: 0.0013e-12,
            e_agg: 5e-9,
            packet_bits: 4000,
            beta_agg: 1.0,
            e_init: 0.5,
        }
    }
}

impl EnergyParams {
    /// Builds a validated parameter set.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        e_elec: f64,
        e_fs: f64,
        e_mp: f64,
        e_agg: f64,
        packet_bits: u64,
        beta_agg: f64,
        e_init: f64,
    ) -> Result<Self> {
        let params = Self {
            e_elec,
            e_fs,
            e_mp,
            e_agg,
            packet_bits,
            beta_agg,
            e_init,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_e_elec(mut self, v: f64) -> Self {
        self.e_elec = v;
        self
    }

    pub fn with_e_fs(mut self, v: f64) -> Self {
        self.e_fs = v;
        self
    }

    pub fn with_e_mp(mut self, v: f64) -> Self {
        self.e_mp = v;
        self
    }

    pub fn with_e_agg(mut self, v: f64) -> Self {
        self.e_agg = v;
        self
    }

    pub fn with_packet_bits(mut self, bits: u64) -> Self {
        self.packet_bits = bits;
        self
    }

    pub fn with_beta_agg(mut self, beta: f64) -> Self {
        self.beta_agg = beta;
        self
    }

    pub fn with_e_init(mut self, v: f64) -> Self {
        self.e_init = v;
        self
    }

    /// Checks the parameter invariants.
    ///
    /// Both amplifier coefficients must be strictly positive since their
    /// ratio defines `d0`.
    pub fn validate(&self) -> Result<()> {
        if !(self.e_fs > 0.0) {
            return Err(PlacementError::invalid("e_fs must be positive"));
        }
        if !(self.e_mp > 0.0) {
            return Err(PlacementError::invalid("e_mp must be positive"));
        }
        if !(self.e_elec >= 0.0) {
            return Err(PlacementError::invalid("e_elec must be non-negative"));
        }
        if !(self.e_agg >= 0.0) {
            return Err(PlacementError::invalid("e_agg must be non-negative"));
        }
        if self.packet_bits == 0 {
            return Err(PlacementError::invalid("packet_bits must be at least 1"));
        }
        if !(self.beta_agg >= 0.0) {
            return Err(PlacementError::invalid("beta_agg must be non-negative"));
        }
        if !(self.e_init >= 0.0) {
            return Err(PlacementError::invalid("e_init must be non-negative"));
        }
        Ok(())
    }
}

/// Threshold distance `d0 = sqrt(e_fs / e_mp)`.
pub fn threshold_distance(params: &EnergyParams) -> Result<f64> {
    if !(params.e_mp > 0.0) {
        return Err(PlacementError::invalid("e_mp must be positive"));
    }
    Ok((params.e_fs / params.e_mp).sqrt())
}

/// Energy to transmit `bits` over `distance` meters.
pub fn transmit_cost(bits: u64, distance: f64, params: &EnergyParams) -> Result<f64> {
    if !(distance >= 0.0) {
        return Err(PlacementError::invalid(format!(
            "distance must be non-negative, got {distance}"
        )));
    }
    let k = bits as f64;
    let amp = if distance < threshold_distance(params)? {
        params.e_fs * distance * distance
    } else {
        params.e_mp * distance.powi(4)
    };
    Ok(k * params.e_elec + k * amp)
}

/// Energy to receive `bits`. Independent of distance.
#[inline]
pub fn receive_cost(bits: u64, params: &EnergyParams) -> f64 {
    bits as f64 * params.e_elec
}

/// Energy to aggregate `bits`.
#[inline]
pub fn aggregation_cost(bits: u64, params: &EnergyParams) -> f64 {
    bits as f64 * params.e_agg
}
