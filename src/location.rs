use serde::{Deserialize, Serialize};

use crate::capabilities::{TimerId, TimerOutput};
use crate::{INITIAL_LATITUDE, INITIAL_LONGITUDE, LOADING_ADDRESS, READY_ADDRESS};

/// NaN-free coordinate. Construction and perturbation clamp into the legal
/// range instead of failing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: clamp_axis(lat, 90.0),
            lng: clamp_axis(lng, 180.0),
        }
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    #[must_use]
    pub fn perturbed(self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }
}

fn clamp_axis(value: f64, bound: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-bound, bound)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for Coordinate {}

/// Simulated device position. Starts cold: a provider handshake has to
/// elapse before the map reads ready and the position begins to wander.
/// Handles taken out of this struct by the release methods must be cleared
/// with the shell by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LiveLocation {
    coordinate: Coordinate,
    address: String,
    map_ready: bool,
    started: bool,
    init_timer: Option<TimerId>,
    drift_timer: Option<TimerId>,
}

impl Default for LiveLocation {
    fn default() -> Self {
        Self {
            coordinate: Coordinate::new(INITIAL_LATITUDE, INITIAL_LONGITUDE),
            address: LOADING_ADDRESS.to_string(),
            map_ready: false,
            started: false,
            init_timer: None,
            drift_timer: None,
        }
    }
}

impl LiveLocation {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    /// Claims the provider handshake. Only the first call per session gets
    /// to arm it; later calls are refused.
    pub fn begin_init(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    pub fn arm_init(&mut self, id: TimerId) {
        self.init_timer = Some(id);
    }

    pub fn arm_drift(&mut self, id: TimerId) {
        self.drift_timer = Some(id);
    }

    /// Applies the handshake completion: the map becomes ready and the
    /// resolved street address replaces the placeholder. Stale unless it is
    /// the armed handshake shot elapsing.
    pub fn complete_init(&mut self, output: &TimerOutput) -> bool {
        let Some(id) = output.elapsed() else {
            return false;
        };
        if self.init_timer != Some(id) {
            return false;
        }
        self.init_timer = None;
        self.map_ready = true;
        self.address = READY_ADDRESS.to_string();
        true
    }

    /// Applies one drift completion, nudging the position by the given
    /// deltas. Stale unless it is the armed drift shot elapsing.
    pub fn apply_drift(&mut self, output: &TimerOutput, dlat: f64, dlng: f64) -> bool {
        let Some(id) = output.elapsed() else {
            return false;
        };
        if self.drift_timer != Some(id) {
            return false;
        }
        self.drift_timer = None;
        self.coordinate = self.coordinate.perturbed(dlat, dlng);
        true
    }

    /// Takes every armed handle. Session teardown path.
    pub fn release_timers(&mut self) -> Vec<TimerId> {
        self.init_timer
            .take()
            .into_iter()
            .chain(self.drift_timer.take())
            .collect()
    }
}
