//! Lighting rig derived per frame from smoothed energy and the scene clock.
//!
//! A dim ambient base, one energy-driven directional light, and up to two
//! threshold-gated point lights. Paused scenes fall back to a fixed dim
//! directional light so nothing pulses while frozen.

use glam::Vec3;

use crate::energy::{EnergyState, BAND_MAX};
use crate::noise::map_range;
use crate::params::LightingParams;

/// One point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub position: Vec3,
}

/// Full lighting state handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LightingRig {
    pub ambient_rgb: [f32; 3],
    pub directional_rgb: [f32; 3],
    /// Not normalized; the collaborator normalizes at upload time
    pub directional_dir: Vec3,
    pub bass_point: Option<PointLight>,
    pub treble_point: Option<PointLight>,
}

impl LightingRig {
    /// Derive the rig for one frame
    pub fn derive(
        params: &LightingParams,
        energy: &EnergyState,
        time_s: f32,
        camera_depth_m: f32,
        playing: bool,
    ) -> Self {
        if !playing {
            return Self {
                ambient_rgb: params.ambient_rgb,
                directional_rgb: params.paused_directional_rgb,
                directional_dir: Vec3::from(params.paused_directional_dir),
                bass_point: None,
                treble_point: None,
            };
        }

        let intensity = map_range(
            energy.total_smoothed(),
            0.0,
            3.0 * BAND_MAX,
            params.directional_intensity.0,
            params.directional_intensity.1,
        );

        let bass_point = (energy.smoothed_bass > params.bass_point_threshold).then(|| {
            let [x, y, z] = params.bass_point_offset_m;
            PointLight {
                color: params.bass_point_rgb,
                position: Vec3::new(x, y, camera_depth_m + z),
            }
        });

        let treble_point = (energy.smoothed_treble > params.treble_point_threshold).then(|| {
            PointLight {
                color: params.treble_point_rgb,
                position: Vec3::new(
                    (time_s * params.treble_orbit_freq.0).sin() * params.treble_orbit_radius_m.0,
                    (time_s * params.treble_orbit_freq.1).cos() * params.treble_orbit_radius_m.1,
                    camera_depth_m + params.treble_point_ahead_m,
                ),
            }
        });

        Self {
            ambient_rgb: params.ambient_rgb,
            directional_rgb: [
                intensity,
                intensity,
                intensity + params.directional_blue_bias,
            ],
            directional_dir: Vec3::from(params.directional_dir),
            bass_point,
            treble_point,
        }
    }
}
