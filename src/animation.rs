//! Per-frame orbit animation for Bevy apps.
//!
//! Entities carrying [`AnimatedOrbit`] get their [`OrbitPosition`] recomputed
//! every frame from the shared [`OrbitClock`]. Drawing the result is left to
//! the host app.

use bevy::prelude::*;

use crate::orbit::{OrbitalElements, PositionVector, position_at};

/// Default mean anomaly advance in radians per second of animation time
/// (one revolution every ~126 s at scale 1).
pub const DEFAULT_MEAN_MOTION_RAD_PER_SEC: f64 = 0.05;

/// Plugin providing orbit animation.
///
/// Adds systems for:
/// - Advancing the animation clock by frame time
/// - Recomputing orbit positions from the clock
#[derive(Default)]
pub struct NeoOrbitPlugin {
    pub config: OrbitAnimationConfig,
}

impl Plugin for NeoOrbitPlugin {
    fn build(&self, app: &mut App) {
        let mut config = self.config.clone();
        if !config.is_valid() {
            warn!(
                "Invalid orbit angular rate {}, using {}",
                config.mean_motion_rad_per_sec, DEFAULT_MEAN_MOTION_RAD_PER_SEC
            );
            config = OrbitAnimationConfig::default();
        }

        app.insert_resource(config)
            .init_resource::<OrbitClock>()
            .add_systems(
                Update,
                (advance_orbit_clock, update_orbit_positions).chain(),
            );
    }
}

/// Tunable visualization rate.
///
/// Real orbital periods are imperceptible at scene scale, so this is a
/// display choice rather than a physical quantity.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitAnimationConfig {
    pub mean_motion_rad_per_sec: f64,
}

impl Default for OrbitAnimationConfig {
    fn default() -> Self {
        Self {
            mean_motion_rad_per_sec: DEFAULT_MEAN_MOTION_RAD_PER_SEC,
        }
    }
}

impl OrbitAnimationConfig {
    pub fn is_valid(&self) -> bool {
        self.mean_motion_rad_per_sec.is_finite() && self.mean_motion_rad_per_sec > 0.0
    }
}

/// Animation time shared by all orbits.
#[derive(Resource, Clone, Debug)]
pub struct OrbitClock {
    /// Animation seconds elapsed.
    pub elapsed: f64,
    /// Animation seconds per real second.
    pub scale: f64,
    pub paused: bool,
}

impl Default for OrbitClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl OrbitClock {
    /// Rewind to the start and pause.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.paused = true;
    }
}

/// Estimated orbit driving an entity.
#[derive(Component, Clone, Debug)]
pub struct AnimatedOrbit {
    pub elements: OrbitalElements,
    /// Added to the clock so objects sharing a clock do not move in lockstep.
    pub time_offset: f64,
}

impl AnimatedOrbit {
    pub fn new(elements: OrbitalElements) -> Self {
        Self {
            elements,
            time_offset: 0.0,
        }
    }
}

/// Latest computed scene position of an [`AnimatedOrbit`].
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct OrbitPosition(pub PositionVector);

/// Advance the animation clock by real frame time.
pub fn advance_orbit_clock(mut clock: ResMut<OrbitClock>, time: Res<Time>) {
    if clock.paused {
        return;
    }
    clock.elapsed += time.delta_secs_f64() * clock.scale;
}

/// Recompute positions for every animated orbit.
///
/// Runs even while paused so newly spawned orbits get a position.
pub fn update_orbit_positions(
    mut orbits: Query<(&AnimatedOrbit, &mut OrbitPosition)>,
    clock: Res<OrbitClock>,
    config: Res<OrbitAnimationConfig>,
) {
    let rate = config.mean_motion_rad_per_sec;
    for (orbit, mut position) in orbits.iter_mut() {
        position.0 = position_at(&orbit.elements, clock.elapsed + orbit.time_offset, rate);
    }
}
