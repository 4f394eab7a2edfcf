//! Camera journey through the garden: monotone forward depth with
//! energy-driven speed, two-stage rotation smoothing, and gentle sway.
//!
//! The camera's depth defines the recycling plane every entity kind tests
//! against; it never decreases during a session.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::energy::EnergyState;
use crate::noise::lerp;
use crate::params::CameraParams;
use crate::scene::SceneClock;

/// Read-only view transform handed to the rendering collaborator
#[derive(Debug, Clone, Copy)]
pub struct CameraTransform {
    pub eye: Vec3,
    pub yaw_rad: f32,
    pub pitch_rad: f32,
}

impl CameraTransform {
    /// View matrix (right-handed, +Z forward, Y up)
    pub fn view_matrix(&self) -> Mat4 {
        let dir = Quat::from_euler(EulerRot::YXZ, self.yaw_rad, self.pitch_rad, 0.0) * Vec3::Z;
        Mat4::look_to_rh(self.eye, dir, Vec3::Y)
    }
}

/// Camera state advanced once per frame
pub struct CameraSystem {
    params: CameraParams,
    depth_m: f32,
    rotation_rad: f32,
    rotation_target_rad: f32,
    sway_x_m: f32,
    sway_y_m: f32,
    pitch_rad: f32,
    idle_bob_m: f32,
}

impl CameraSystem {
    /// Create new camera system at depth zero
    pub fn new(params: CameraParams) -> Self {
        Self {
            params,
            depth_m: 0.0,
            rotation_rad: 0.0,
            rotation_target_rad: 0.0,
            sway_x_m: 0.0,
            sway_y_m: 0.0,
            pitch_rad: 0.0,
            idle_bob_m: 0.0,
        }
    }

    /// Advance one playing frame.
    ///
    /// Depth grows by the base speed plus a bass-proportional term, so it is
    /// strictly increasing. Rotation is smoothed twice: the target chases a
    /// mid-energy sinusoid, the actual rotation chases the target.
    pub fn advance(&mut self, clock: &SceneClock, energy: &EnergyState) {
        let p = &self.params;
        let t = clock.time_s;

        self.depth_m += p.base_forward_speed_m + energy.smoothed_bass * p.bass_speed_scale;

        let drive =
            (t * p.rotation_wave_freq).sin() * energy.smoothed_mid * p.mid_rotation_scale;
        self.rotation_target_rad = lerp(self.rotation_target_rad, drive, p.rotation_target_alpha);
        self.rotation_rad = lerp(self.rotation_rad, self.rotation_target_rad, p.rotation_alpha);

        self.sway_x_m = (t * p.sway_x_freq).sin() * energy.smoothed_mid * p.mid_sway_scale;
        self.sway_y_m = (t * p.sway_y_freq).cos() * energy.smoothed_bass * p.bass_sway_scale;
        self.pitch_rad = (t * p.pitch_freq).sin() * energy.smoothed_treble * p.treble_pitch_scale;
        self.idle_bob_m = 0.0;
    }

    /// Idle frame while paused: slow vertical bob, no rotation, no forward motion
    pub fn idle(&mut self, frame: u64) {
        let p = &self.params;
        self.idle_bob_m = (frame as f32 * p.idle_bob_freq).sin() * p.idle_bob_amplitude_m;
    }

    /// Current forward position (meters)
    pub fn depth_m(&self) -> f32 {
        self.depth_m
    }

    /// Current smoothed rotation (radians)
    pub fn rotation_rad(&self) -> f32 {
        self.rotation_rad
    }

    /// View transform for the rendering collaborator
    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            eye: Vec3::new(self.sway_x_m, self.sway_y_m + self.idle_bob_m, self.depth_m),
            yaw_rad: self.rotation_rad,
            pitch_rad: self.pitch_rad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::BandSample;
    use crate::params::ClockParams;

    fn energy_at(bass: f32, mid: f32, treble: f32) -> EnergyState {
        let mut energy = EnergyState::default();
        energy.update(BandSample::new(bass, mid, treble), 1.0);
        energy
    }

    #[test]
    fn test_depth_strictly_increases_while_playing() {
        let mut camera = CameraSystem::new(CameraParams::default());
        let mut clock = SceneClock::default();
        let energy = energy_at(0.0, 0.0, 0.0);

        let mut previous = camera.depth_m();
        for _ in 0..100 {
            camera.advance(&clock, &energy);
            clock.advance(&ClockParams::default());
            assert!(camera.depth_m() > previous);
            previous = camera.depth_m();
        }
    }

    #[test]
    fn test_bass_speeds_up_forward_motion() {
        let clock = SceneClock::default();

        let mut quiet = CameraSystem::new(CameraParams::default());
        quiet.advance(&clock, &energy_at(0.0, 0.0, 0.0));

        let mut loud = CameraSystem::new(CameraParams::default());
        loud.advance(&clock, &energy_at(255.0, 0.0, 0.0));

        assert!(loud.depth_m() > quiet.depth_m());
    }

    #[test]
    fn test_idle_mode_does_not_move_forward() {
        let mut camera = CameraSystem::new(CameraParams::default());
        let clock = SceneClock::default();
        camera.advance(&clock, &energy_at(100.0, 100.0, 100.0));

        let depth = camera.depth_m();
        let rotation = camera.rotation_rad();
        for frame in 0..50 {
            camera.idle(frame);
            assert_eq!(camera.depth_m(), depth);
            assert_eq!(camera.rotation_rad(), rotation);
        }

        // Bob stays within its configured amplitude
        let bob = camera.transform().eye.y - camera.sway_y_m;
        assert!(bob.abs() <= CameraParams::default().idle_bob_amplitude_m);
    }

    #[test]
    fn test_rotation_is_smoothed_in_two_stages() {
        let mut camera = CameraSystem::new(CameraParams::default());
        let mut clock = SceneClock::default();
        // Skip ahead so the drive sinusoid is well away from zero
        for _ in 0..200 {
            clock.advance(&ClockParams::default());
        }

        let energy = energy_at(0.0, 255.0, 0.0);
        camera.advance(&clock, &energy);

        let drive = (clock.time_s * 0.2).sin() * 255.0 * 0.0003;
        // After one frame the rotation has moved only a small fraction of the drive
        assert!(camera.rotation_rad().abs() < drive.abs());
    }

    #[test]
    fn test_view_matrix_is_finite() {
        let mut camera = CameraSystem::new(CameraParams::default());
        let clock = SceneClock::default();
        camera.advance(&clock, &energy_at(120.0, 90.0, 60.0));

        let view = camera.transform().view_matrix();
        assert!(view.to_cols_array().iter().all(|v| v.is_finite()));
        assert_ne!(view, Mat4::ZERO);
    }
}
