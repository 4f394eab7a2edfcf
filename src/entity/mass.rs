//! Organic mass: a bass-driven closed ring of morphing vertices.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::UpdateContext;
use crate::energy::{EnergyState, BAND_MAX};
use crate::noise::map_range;
use crate::params::{band_brightness, FieldExtent, MassParams};

/// One vertex of the mass ring
#[derive(Debug, Clone, PartialEq)]
pub struct RingVertex {
    pub angle_rad: f32,
    /// Current radius as a fraction of body size, driven by noise and bass
    pub radius: f32,
    base_radius: f32,
    pub height_m: f32,
}

/// Bass-responsive amorphous body
pub struct OrganicMass {
    pub position: Vec3,
    base_size_m: f32,
    size_m: f32,
    vertices: Vec<RingVertex>,
    noise_offsets: Vec<f32>,
    morph_phase: f32,
}

impl OrganicMass {
    pub fn spawn<R: Rng>(
        params: &MassParams,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        let base_size_m = rng.gen_range(params.base_size_m.0..params.base_size_m.1);
        let mut mass = Self {
            position: params.placement.spawn_position(extent, camera_depth_m, rng),
            base_size_m,
            size_m: base_size_m,
            vertices: Vec::new(),
            noise_offsets: Vec::new(),
            morph_phase: rng.gen_range(0.0..TAU),
        };
        mass.generate_ring(params, rng);
        mass
    }

    /// Replace the whole ring; the count is redrawn, never partially resized.
    fn generate_ring<R: Rng>(&mut self, params: &MassParams, rng: &mut R) {
        // Clamp so a degenerate draw can never produce a ring below two vertices
        let count = rng
            .gen_range(params.vertex_count.0..=params.vertex_count.1)
            .max(2);

        self.vertices = (0..count)
            .map(|i| {
                let base_radius = rng.gen_range(params.vertex_radius.0..params.vertex_radius.1);
                RingVertex {
                    angle_rad: TAU / count as f32 * i as f32,
                    radius: base_radius,
                    base_radius,
                    height_m: rng.gen_range(params.vertex_height_m.0..params.vertex_height_m.1),
                }
            })
            .collect();
        self.noise_offsets = (0..count).map(|_| rng.gen_range(0.0..1000.0)).collect();
    }

    pub(super) fn animate(&mut self, ctx: &UpdateContext<'_>) {
        let p = &ctx.config.mass;
        let bass = ctx.energy.smoothed_bass;

        self.morph_phase += p.morph_rate + bass * p.bass_morph_scale;
        self.size_m = self.base_size_m + bass * p.bass_size_scale;

        let bass_influence =
            map_range(bass, 0.0, BAND_MAX, p.bass_influence.0, p.bass_influence.1);
        let morph_phase = self.morph_phase;

        for (i, (vertex, offset)) in self
            .vertices
            .iter_mut()
            .zip(self.noise_offsets.iter_mut())
            .enumerate()
        {
            let noise_val = ctx.field.sample(*offset + ctx.noise_phase * p.noise_phase_scale);
            vertex.radius = vertex.base_radius * noise_val * bass_influence;
            vertex.height_m +=
                (morph_phase + i as f32 * p.vertex_phase_spread).sin() * bass * p.height_drift_scale;
            *offset += p.vertex_noise_rate;
        }
    }

    pub(super) fn recycle<R: Rng>(
        &mut self,
        params: &MassParams,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        self.position.z = params.placement.respawn_depth(camera_depth_m, rng);
        self.generate_ring(params, rng);
    }

    pub fn depth_m(&self) -> f32 {
        self.position.z
    }

    pub fn ring(&self) -> &[RingVertex] {
        &self.vertices
    }

    pub fn render_data(&self, params: &MassParams, energy: &EnergyState) -> MassRenderData<'_> {
        MassRenderData {
            position: self.position,
            size_m: self.size_m,
            ring: &self.vertices,
            brightness: band_brightness(energy.smoothed_bass, params.brightness),
        }
    }
}

/// Render hand-off: the collaborator triangulates the ring around the center
pub struct MassRenderData<'a> {
    pub position: Vec3,
    pub size_m: f32,
    pub ring: &'a [RingVertex],
    pub brightness: f32,
}
