//! Creeping vine: a mid-driven chain of swaying, tapering segments.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::UpdateContext;
use crate::energy::EnergyState;
use crate::params::{band_brightness, FieldExtent, VineParams};

/// One segment of the vine chain
#[derive(Debug, Clone, PartialEq)]
pub struct VineSegment {
    /// Position relative to the vine root (meters)
    pub position: Vec3,
    pub thickness_m: f32,
    noise_offset: f32,
}

/// Mid-responsive segmented tendril
pub struct CreepingVine {
    pub position: Vec3,
    segments: Vec<VineSegment>,
    base_thickness_m: f32,
    growth_phase: f32,
}

impl CreepingVine {
    pub fn spawn<R: Rng>(
        params: &VineParams,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        let mut vine = Self {
            position: params.placement.spawn_position(extent, camera_depth_m, rng),
            segments: Vec::new(),
            base_thickness_m: rng.gen_range(params.base_thickness_m.0..params.base_thickness_m.1),
            growth_phase: rng.gen_range(0.0..TAU),
        };
        vine.grow_chain(params, rng);
        vine
    }

    /// Rebuild the chain from the root; each segment steps a short random
    /// distance from the previous one. The count is redrawn, never partially
    /// resized.
    fn grow_chain<R: Rng>(&mut self, params: &VineParams, rng: &mut R) {
        let count = rng
            .gen_range(params.segment_count.0..=params.segment_count.1)
            .max(2);

        let mut current = Vec3::ZERO;
        self.segments = (0..count)
            .map(|i| {
                let length = rng.gen_range(params.segment_length_m.0..params.segment_length_m.1);
                let bend = rng.gen_range(-params.segment_bend_rad..params.segment_bend_rad);
                current += Vec3::new(
                    bend.cos() * length,
                    bend.sin() * length,
                    rng.gen_range(-params.segment_depth_jitter_m..params.segment_depth_jitter_m),
                );
                VineSegment {
                    position: current,
                    thickness_m: self.base_thickness_m * (1.0 - i as f32 / count as f32),
                    noise_offset: rng.gen_range(0.0..1000.0),
                }
            })
            .collect();
    }

    pub(super) fn animate(&mut self, ctx: &UpdateContext<'_>) {
        let p = &ctx.config.vine;
        let mid = ctx.energy.smoothed_mid;

        self.growth_phase += p.growth_rate + mid * p.mid_growth_scale;
        let growth_phase = self.growth_phase;
        let mid_influence = mid * p.mid_sway_scale;
        let count = self.segments.len() as f32;
        let base_thickness_m = self.base_thickness_m;

        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.noise_offset += p.segment_noise_rate;
            let noise_val =
                ctx.field.sample(segment.noise_offset + ctx.noise_phase * p.noise_phase_scale);

            segment.position += Vec3::new(
                (growth_phase + i as f32 * p.sway_phase_spread_x).sin() * mid_influence,
                (growth_phase + i as f32 * p.sway_phase_spread_y).cos()
                    * mid_influence
                    * p.vertical_sway_ratio,
                noise_val * mid_influence,
            );

            // Linear taper from root to tip, thickened slightly by mid energy
            segment.thickness_m =
                base_thickness_m * (1.0 - i as f32 / count) + mid * p.mid_thickness_scale;
        }
    }

    pub(super) fn recycle<R: Rng>(
        &mut self,
        params: &VineParams,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        self.position.z = params.placement.respawn_depth(camera_depth_m, rng);
        self.grow_chain(params, rng);
    }

    pub fn depth_m(&self) -> f32 {
        self.position.z
    }

    pub fn segments(&self) -> &[VineSegment] {
        &self.segments
    }

    pub fn render_data(&self, params: &VineParams, energy: &EnergyState) -> VineRenderData<'_> {
        VineRenderData {
            position: self.position,
            segments: &self.segments,
            brightness: band_brightness(energy.smoothed_mid, params.brightness),
        }
    }
}

/// Render hand-off: consecutive segments joined by weighted line strokes
pub struct VineRenderData<'a> {
    pub position: Vec3,
    pub segments: &'a [VineSegment],
    pub brightness: f32,
}
