//! Smoke puff: a single drifting point with bass-swollen size.
//!
//! The cheapest kind by far, so it runs at the largest population. No
//! substructure; drift comes from two decorrelated noise channels.

use glam::Vec3;
use rand::Rng;

use super::UpdateContext;
use crate::energy::EnergyState;
use crate::noise::map_range;
use crate::params::{band_brightness, FieldExtent, SmokeParams};

/// Bass-responsive atmospheric puff
pub struct SmokePuff {
    pub position: Vec3,
    pub size_m: f32,
    pub opacity: f32,
    drift_speed_m: f32,
    noise_offset: f32,
}

impl SmokePuff {
    pub fn spawn<R: Rng>(
        params: &SmokeParams,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            position: params.placement.spawn_position(extent, camera_depth_m, rng),
            size_m: rng.gen_range(params.size_m.0..params.size_m.1),
            opacity: rng.gen_range(params.opacity.0..params.opacity.1),
            drift_speed_m: rng.gen_range(params.drift_speed_m.0..params.drift_speed_m.1),
            noise_offset: rng.gen_range(0.0..1000.0),
        }
    }

    pub(super) fn animate<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        let p = &ctx.config.smoke;
        let bass = ctx.energy.smoothed_bass;

        self.noise_offset += p.drift_noise_rate;
        let d = self.drift_speed_m;

        // Horizontal and vertical drift sample decorrelated noise channels
        let drift_x = map_range(ctx.field.sample(self.noise_offset), 0.0, 1.0, -d, d);
        let drift_y = map_range(
            ctx.field.sample(self.noise_offset + p.vertical_noise_offset),
            0.0,
            1.0,
            -d * p.vertical_drift_ratio,
            d * p.vertical_drift_ratio,
        );
        self.position.x += drift_x;
        self.position.y += drift_y;

        self.size_m = rng.gen_range(p.size_m.0..p.size_m.1) + bass * p.bass_size_scale;
    }

    pub(super) fn recycle<R: Rng>(
        &mut self,
        params: &SmokeParams,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        // No substructure to regenerate; only the depth is reseeded
        self.position.z = params.placement.respawn_depth(camera_depth_m, rng);
    }

    pub fn depth_m(&self) -> f32 {
        self.position.z
    }

    pub fn render_data(&self, params: &SmokeParams, energy: &EnergyState) -> SmokeRenderData {
        SmokeRenderData {
            position: self.position,
            size_m: self.size_m,
            opacity: self.opacity,
            brightness: band_brightness(energy.smoothed_bass, params.brightness),
        }
    }
}

/// Render hand-off: one translucent billboard per puff
pub struct SmokeRenderData {
    pub position: Vec3,
    pub size_m: f32,
    pub opacity: f32,
    pub brightness: f32,
}
