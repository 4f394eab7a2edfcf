//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables live here with:
//! - Physical units (meters, radians, band-energy units)
//! - Documented ranges and meanings
//! - Defaults matching the reference tuning

use glam::Vec3;
use rand::Rng;

use crate::energy::BAND_MAX;

/// Energy smoothing and onset detection configuration
#[derive(Debug, Clone)]
pub struct SmoothingParams {
    /// Exponential smoothing factor applied to each raw band per frame.
    /// Small values = heavy smoothing (organic, laggy response).
    pub energy_alpha: f32,

    /// Raw frame-to-frame increase (band-energy units) treated as an
    /// instrument-onset transient.
    pub onset_threshold: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            energy_alpha: 0.04,
            onset_threshold: 80.0,
        }
    }
}

/// Virtual time and noise phase increments per playing frame
#[derive(Debug, Clone)]
pub struct ClockParams {
    /// Virtual time step per frame (seconds, assumes 60 fps cadence)
    pub time_step_s: f32,

    /// Global noise phase step per frame (field offset units)
    pub noise_phase_step: f32,
}

impl Default for ClockParams {
    fn default() -> Self {
        Self {
            time_step_s: 0.016,
            noise_phase_step: 0.002,
        }
    }
}

/// Camera journey parameters
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Forward speed floor (meters per frame), applied even at zero energy
    pub base_forward_speed_m: f32,

    /// Extra forward speed per unit of smoothed bass (meters per frame)
    pub bass_speed_scale: f32,

    /// Frequency of the rotation drive wave (radians per virtual second)
    pub rotation_wave_freq: f32,

    /// Rotation target amplitude per unit of smoothed mid (radians)
    pub mid_rotation_scale: f32,

    /// Smoothing factor pulling the rotation target toward its drive wave
    pub rotation_target_alpha: f32,

    /// Smoothing factor pulling the actual rotation toward its target.
    /// Two-stage smoothing keeps turns gradual.
    pub rotation_alpha: f32,

    /// Horizontal sway wave frequency (radians per virtual second)
    pub sway_x_freq: f32,

    /// Horizontal sway amplitude per unit of smoothed mid (meters)
    pub mid_sway_scale: f32,

    /// Vertical sway wave frequency (radians per virtual second)
    pub sway_y_freq: f32,

    /// Vertical sway amplitude per unit of smoothed bass (meters)
    pub bass_sway_scale: f32,

    /// Pitch wave frequency (radians per virtual second)
    pub pitch_freq: f32,

    /// Pitch amplitude per unit of smoothed treble (radians)
    pub treble_pitch_scale: f32,

    /// Idle-mode vertical bob frequency (radians per frame)
    pub idle_bob_freq: f32,

    /// Idle-mode vertical bob amplitude (meters)
    pub idle_bob_amplitude_m: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            base_forward_speed_m: 2.0,
            bass_speed_scale: 0.008,
            rotation_wave_freq: 0.2,
            mid_rotation_scale: 0.0003,
            rotation_target_alpha: 0.02,
            rotation_alpha: 0.03,
            sway_x_freq: 0.3,
            mid_sway_scale: 0.01,
            sway_y_freq: 0.25,
            bass_sway_scale: 0.008,
            pitch_freq: 0.1,
            treble_pitch_scale: 0.00008,
            idle_bob_freq: 0.01,
            idle_bob_amplitude_m: 3.0,
        }
    }
}

/// Lateral extent of the populated field around the camera axis
#[derive(Debug, Clone)]
pub struct FieldExtent {
    /// Reference field width (meters); per-kind lateral scales multiply this
    pub width_m: f32,

    /// Reference field height (meters); per-kind vertical scales multiply this
    pub height_m: f32,
}

impl Default for FieldExtent {
    fn default() -> Self {
        Self {
            width_m: 1280.0,
            height_m: 720.0,
        }
    }
}

/// Placement and recycling band for one entity kind.
///
/// The camera advances toward +Z. An entity is stale once its reference
/// depth falls more than `recycle_distance_m` behind the camera, at which
/// point it is reseeded ahead within `respawn_depth_m`.
#[derive(Debug, Clone)]
pub struct PlacementBand {
    /// Lateral spawn extent as a multiple of the field width (± range)
    pub lateral_extent_scale: f32,

    /// Vertical spawn extent as a multiple of the field height (± range)
    pub vertical_extent_scale: f32,

    /// Depth ahead of the camera at initial construction (meters, min..max)
    pub spawn_depth_m: (f32, f32),

    /// Depth ahead of the camera after a recycle (meters, min..max)
    pub respawn_depth_m: (f32, f32),

    /// Distance behind the camera at which the entity is recycled (meters)
    pub recycle_distance_m: f32,
}

impl PlacementBand {
    /// Sample an initial position relative to the current camera depth
    pub fn spawn_position<R: Rng>(
        &self,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Vec3 {
        let half_x = extent.width_m * self.lateral_extent_scale;
        let half_y = extent.height_m * self.vertical_extent_scale;
        Vec3::new(
            rng.gen_range(-half_x..half_x),
            rng.gen_range(-half_y..half_y),
            camera_depth_m + rng.gen_range(self.spawn_depth_m.0..self.spawn_depth_m.1),
        )
    }

    /// Sample a fresh depth ahead of the camera for a recycled entity
    pub fn respawn_depth<R: Rng>(&self, camera_depth_m: f32, rng: &mut R) -> f32 {
        camera_depth_m + rng.gen_range(self.respawn_depth_m.0..self.respawn_depth_m.1)
    }
}

/// Organic mass parameters (bass-driven closed ring)
#[derive(Debug, Clone)]
pub struct MassParams {
    pub placement: PlacementBand,

    /// Base body size before bass pulsation (meters, min..max)
    pub base_size_m: (f32, f32),

    /// Ring vertex count drawn at construction (min..max, inclusive)
    pub vertex_count: (usize, usize),

    /// Per-vertex base radius as a fraction of body size (min..max)
    pub vertex_radius: (f32, f32),

    /// Per-vertex initial height (meters, min..max)
    pub vertex_height_m: (f32, f32),

    /// Morph phase advance per frame (radians)
    pub morph_rate: f32,

    /// Extra morph phase advance per unit of smoothed bass (radians)
    pub bass_morph_scale: f32,

    /// Body size gain per unit of smoothed bass (meters)
    pub bass_size_scale: f32,

    /// Vertex radius multiplier range mapped from smoothed bass [0, BAND_MAX]
    pub bass_influence: (f32, f32),

    /// Vertex height drift per unit of smoothed bass (meters per frame)
    pub height_drift_scale: f32,

    /// Per-vertex noise offset advance per frame
    pub vertex_noise_rate: f32,

    /// Multiplier applied to the global noise phase when sampling vertices
    pub noise_phase_scale: f32,

    /// Phase spread between adjacent vertices in the morph wave (radians)
    pub vertex_phase_spread: f32,

    /// Brightness range mapped from smoothed bass [0, BAND_MAX]
    pub brightness: (f32, f32),
}

impl Default for MassParams {
    fn default() -> Self {
        Self {
            placement: PlacementBand {
                lateral_extent_scale: 1.8,
                vertical_extent_scale: 0.8,
                spawn_depth_m: (800.0, 2000.0),
                respawn_depth_m: (200.0, 1500.0),
                recycle_distance_m: 2500.0,
            },
            base_size_m: (120.0, 300.0),
            vertex_count: (12, 20),
            vertex_radius: (0.6, 1.4),
            vertex_height_m: (-20.0, 20.0),
            morph_rate: 0.008,
            bass_morph_scale: 0.00005,
            bass_size_scale: 1.5,
            bass_influence: (0.8, 2.2),
            height_drift_scale: 0.002,
            vertex_noise_rate: 0.003,
            noise_phase_scale: 3.0,
            vertex_phase_spread: 0.5,
            brightness: (70.0, 160.0),
        }
    }
}

/// Particle cluster parameters (treble-driven point cloud)
#[derive(Debug, Clone)]
pub struct ClusterParams {
    pub placement: PlacementBand,

    /// Particle count drawn at construction (min..max, inclusive)
    pub particle_count: (usize, usize),

    /// Initial particle offset radius from the cluster center (meters)
    pub offset_radius_m: (f32, f32),

    /// Particle size range before treble gain (meters)
    pub particle_size_m: (f32, f32),

    /// Per-particle opacity range
    pub particle_opacity: (f32, f32),

    /// Per-particle noise offset advance per frame
    pub particle_noise_rate: f32,

    /// Impulse magnitude per unit of smoothed treble (meters per frame)
    pub treble_impulse_scale: f32,

    /// Multiplicative damping applied to offsets each frame.
    /// Must stay below 1.0 so accumulated impulses cannot diverge.
    pub offset_damping: f32,

    /// Particle size gain per unit of smoothed treble (meters)
    pub treble_size_scale: f32,

    /// Brightness range mapped from smoothed treble [0, BAND_MAX]
    pub brightness: (f32, f32),
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            placement: PlacementBand {
                lateral_extent_scale: 2.5,
                vertical_extent_scale: 1.0,
                spawn_depth_m: (500.0, 1800.0),
                respawn_depth_m: (300.0, 1200.0),
                recycle_distance_m: 2200.0,
            },
            particle_count: (40, 80),
            offset_radius_m: (30.0, 150.0),
            particle_size_m: (2.0, 8.0),
            particle_opacity: (0.3, 0.8),
            particle_noise_rate: 0.004,
            treble_impulse_scale: 0.01,
            offset_damping: 0.98,
            treble_size_scale: 0.02,
            brightness: (120.0, 200.0),
        }
    }
}

/// Creeping vine parameters (mid-driven segment chain)
#[derive(Debug, Clone)]
pub struct VineParams {
    pub placement: PlacementBand,

    /// Segment count drawn at construction (min..max, inclusive)
    pub segment_count: (usize, usize),

    /// Root thickness before taper and mid gain (meters)
    pub base_thickness_m: (f32, f32),

    /// Step length between chained segments at construction (meters)
    pub segment_length_m: (f32, f32),

    /// Bend angle between chained segments at construction (radians, ± range)
    pub segment_bend_rad: f32,

    /// Depth jitter between chained segments at construction (meters, ± range)
    pub segment_depth_jitter_m: f32,

    /// Growth phase advance per frame (radians)
    pub growth_rate: f32,

    /// Extra growth phase advance per unit of smoothed mid (radians)
    pub mid_growth_scale: f32,

    /// Sway displacement per unit of smoothed mid (meters per frame)
    pub mid_sway_scale: f32,

    /// Vertical sway fraction of the horizontal sway
    pub vertical_sway_ratio: f32,

    /// Phase spread between segments, horizontal sway wave (radians)
    pub sway_phase_spread_x: f32,

    /// Phase spread between segments, vertical sway wave (radians)
    pub sway_phase_spread_y: f32,

    /// Per-segment noise offset advance per frame
    pub segment_noise_rate: f32,

    /// Multiplier applied to the global noise phase when sampling segments
    pub noise_phase_scale: f32,

    /// Thickness gain per unit of smoothed mid (meters)
    pub mid_thickness_scale: f32,

    /// Brightness range mapped from smoothed mid [0, BAND_MAX]
    pub brightness: (f32, f32),
}

impl Default for VineParams {
    fn default() -> Self {
        Self {
            placement: PlacementBand {
                lateral_extent_scale: 2.0,
                vertical_extent_scale: 1.0,
                spawn_depth_m: (600.0, 1800.0),
                respawn_depth_m: (400.0, 1200.0),
                recycle_distance_m: 2300.0,
            },
            segment_count: (15, 30),
            base_thickness_m: (4.0, 12.0),
            segment_length_m: (15.0, 35.0),
            segment_bend_rad: 0.3,
            segment_depth_jitter_m: 5.0,
            growth_rate: 0.015,
            mid_growth_scale: 0.00008,
            mid_sway_scale: 0.008,
            vertical_sway_ratio: 0.7,
            sway_phase_spread_x: 0.3,
            sway_phase_spread_y: 0.4,
            segment_noise_rate: 0.005,
            noise_phase_scale: 2.0,
            mid_thickness_scale: 0.01,
            brightness: (90.0, 170.0),
        }
    }
}

/// Smoke puff parameters (bass-driven atmospheric point)
#[derive(Debug, Clone)]
pub struct SmokeParams {
    pub placement: PlacementBand,

    /// Puff size range before bass gain (meters)
    pub size_m: (f32, f32),

    /// Puff opacity range
    pub opacity: (f32, f32),

    /// Drift speed range (meters per frame)
    pub drift_speed_m: (f32, f32),

    /// Noise offset advance per frame
    pub drift_noise_rate: f32,

    /// Offset added to decorrelate the vertical drift channel
    pub vertical_noise_offset: f32,

    /// Vertical drift fraction of the horizontal drift
    pub vertical_drift_ratio: f32,

    /// Size gain per unit of smoothed bass (meters)
    pub bass_size_scale: f32,

    /// Brightness range mapped from smoothed bass [0, BAND_MAX]
    pub brightness: (f32, f32),
}

impl Default for SmokeParams {
    fn default() -> Self {
        Self {
            placement: PlacementBand {
                lateral_extent_scale: 3.0,
                vertical_extent_scale: 1.5,
                spawn_depth_m: (1000.0, 2500.0),
                respawn_depth_m: (500.0, 2000.0),
                recycle_distance_m: 3000.0,
            },
            size_m: (50.0, 150.0),
            opacity: (0.2, 0.6),
            drift_speed_m: (0.3, 0.8),
            drift_noise_rate: 0.003,
            vertical_noise_offset: 100.0,
            vertical_drift_ratio: 0.5,
            bass_size_scale: 0.5,
            brightness: (60.0, 120.0),
        }
    }
}

/// Morphing line parameters (treble-driven control-point strip)
#[derive(Debug, Clone)]
pub struct LineParams {
    pub placement: PlacementBand,

    /// Control point count drawn at construction (min..max, inclusive)
    pub point_count: (usize, usize),

    /// Morph phase advance per frame (radians)
    pub morph_rate: f32,

    /// Extra morph phase advance per unit of smoothed treble (radians)
    pub treble_morph_scale: f32,

    /// Offset magnitude per unit of smoothed treble (meters)
    pub treble_stretch_scale: f32,

    /// Phase spread between control points in the morph wave (radians)
    pub point_phase_spread: f32,

    /// Per-point noise offset advance per frame
    pub point_noise_rate: f32,

    /// Multiplier applied to the global noise phase when sampling points
    pub noise_phase_scale: f32,

    /// Base stroke weight before treble gain
    pub base_stroke_weight: f32,

    /// Stroke weight gain per unit of smoothed treble
    pub treble_stroke_scale: f32,

    /// Brightness range mapped from smoothed treble [0, BAND_MAX]
    pub brightness: (f32, f32),
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            placement: PlacementBand {
                lateral_extent_scale: 2.0,
                vertical_extent_scale: 1.0,
                spawn_depth_m: (800.0, 1800.0),
                respawn_depth_m: (400.0, 1200.0),
                recycle_distance_m: 2400.0,
            },
            point_count: (8, 16),
            morph_rate: 0.02,
            treble_morph_scale: 0.0001,
            treble_stretch_scale: 0.3,
            point_phase_spread: 0.5,
            point_noise_rate: 0.008,
            noise_phase_scale: 4.0,
            base_stroke_weight: 2.0,
            treble_stroke_scale: 0.015,
            brightness: (110.0, 220.0),
        }
    }
}

/// Pool sizing for the five entity kinds
#[derive(Debug, Clone)]
pub struct PopulationParams {
    /// Target pool size per kind (entities recycled in place, never freed)
    pub mass_target: usize,
    pub cluster_target: usize,
    pub vine_target: usize,
    pub smoke_target: usize,
    pub line_target: usize,

    /// Hard ceiling as a multiple of the target; onset bursts past the
    /// ceiling are dropped so pools cannot grow without bound.
    pub ceiling_factor: usize,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            mass_target: 8,
            cluster_target: 12,
            vine_target: 6,
            smoke_target: 40,
            line_target: 8,
            ceiling_factor: 4,
        }
    }
}

/// Lighting parameter derivation
#[derive(Debug, Clone)]
pub struct LightingParams {
    /// Ambient color (RGB, band-brightness units)
    pub ambient_rgb: [f32; 3],

    /// Directional intensity range mapped from total smoothed energy
    /// [0, 3 * BAND_MAX]
    pub directional_intensity: (f32, f32),

    /// Blue channel bias added to the directional color
    pub directional_blue_bias: f32,

    /// Directional light direction while playing (not normalized)
    pub directional_dir: [f32; 3],

    /// Smoothed bass level above which the bass point light switches on
    pub bass_point_threshold: f32,

    /// Bass point light color (RGB)
    pub bass_point_rgb: [f32; 3],

    /// Bass point light position relative to the camera depth (meters)
    pub bass_point_offset_m: [f32; 3],

    /// Smoothed treble level above which the orbiting point light switches on
    pub treble_point_threshold: f32,

    /// Treble point light color (RGB)
    pub treble_point_rgb: [f32; 3],

    /// Treble point orbit radii, horizontal and vertical (meters)
    pub treble_orbit_radius_m: (f32, f32),

    /// Treble point orbit frequencies, horizontal and vertical
    /// (radians per virtual second)
    pub treble_orbit_freq: (f32, f32),

    /// Depth of the treble point ahead of the camera (meters)
    pub treble_point_ahead_m: f32,

    /// Directional color while paused (RGB)
    pub paused_directional_rgb: [f32; 3],

    /// Directional light direction while paused (not normalized)
    pub paused_directional_dir: [f32; 3],
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            ambient_rgb: [8.0, 10.0, 12.0],
            directional_intensity: (20.0, 100.0),
            directional_blue_bias: 5.0,
            directional_dir: [0.3, 0.7, 1.0],
            bass_point_threshold: 80.0,
            bass_point_rgb: [80.0, 75.0, 85.0],
            bass_point_offset_m: [0.0, -300.0, 200.0],
            treble_point_threshold: 120.0,
            treble_point_rgb: [120.0, 125.0, 130.0],
            treble_orbit_radius_m: (200.0, 150.0),
            treble_orbit_freq: (2.0, 1.7),
            treble_point_ahead_m: 100.0,
            paused_directional_rgb: [40.0, 42.0, 45.0],
            paused_directional_dir: [0.5, 0.8, 1.0],
        }
    }
}

/// Top-level configuration for a garden scene
#[derive(Debug, Clone, Default)]
pub struct GardenConfig {
    pub smoothing: SmoothingParams,
    pub clock: ClockParams,
    pub camera: CameraParams,
    pub field: FieldExtent,
    pub mass: MassParams,
    pub cluster: ClusterParams,
    pub vine: VineParams,
    pub smoke: SmokeParams,
    pub line: LineParams,
    pub population: PopulationParams,
    pub lighting: LightingParams,
    pub noise_seed: u32,
}

impl GardenConfig {
    /// Maximum spawn-ahead distance across all kinds (meters); entities
    /// always lie within [camera - K_kind, camera + this] of the camera.
    pub fn max_spawn_ahead_m(&self) -> f32 {
        [
            self.mass.placement.spawn_depth_m.1,
            self.cluster.placement.spawn_depth_m.1,
            self.vine.placement.spawn_depth_m.1,
            self.smoke.placement.spawn_depth_m.1,
            self.line.placement.spawn_depth_m.1,
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }
}

/// Brightness from a smoothed band value into a fixed range
pub fn band_brightness(smoothed: f32, range: (f32, f32)) -> f32 {
    crate::noise::map_range(smoothed, 0.0, BAND_MAX, range.0, range.1)
}
