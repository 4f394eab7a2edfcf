//! Particle cluster: a treble-driven cloud of damped, impulse-kicked points.

use glam::Vec3;
use rand::Rng;

use super::UpdateContext;
use crate::energy::EnergyState;
use crate::noise::random_unit_vector;
use crate::params::{band_brightness, ClusterParams, FieldExtent};

/// One particle offset within the cloud
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParticle {
    /// Offset from the cluster center (meters)
    pub offset: Vec3,
    noise_offset: f32,
    pub size_m: f32,
    pub opacity: f32,
}

/// Treble-responsive particle cloud
pub struct ParticleCluster {
    pub position: Vec3,
    particles: Vec<ClusterParticle>,
}

impl ParticleCluster {
    pub fn spawn<R: Rng>(
        params: &ClusterParams,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        let mut cluster = Self {
            position: params.placement.spawn_position(extent, camera_depth_m, rng),
            particles: Vec::new(),
        };
        cluster.generate_cloud(params, rng);
        cluster
    }

    /// Replace the whole cloud; the count is redrawn, never partially resized.
    fn generate_cloud<R: Rng>(&mut self, params: &ClusterParams, rng: &mut R) {
        let count = rng
            .gen_range(params.particle_count.0..=params.particle_count.1)
            .max(2);

        self.particles = (0..count)
            .map(|_| ClusterParticle {
                offset: random_unit_vector(rng)
                    * rng.gen_range(params.offset_radius_m.0..params.offset_radius_m.1),
                noise_offset: rng.gen_range(0.0..1000.0),
                size_m: rng.gen_range(params.particle_size_m.0..params.particle_size_m.1),
                opacity: rng.gen_range(params.particle_opacity.0..params.particle_opacity.1),
            })
            .collect();
    }

    pub(super) fn animate<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        let p = &ctx.config.cluster;
        let treble = ctx.energy.smoothed_treble;

        for particle in &mut self.particles {
            particle.noise_offset += p.particle_noise_rate;

            let noise_val = ctx.field.sample(particle.noise_offset);
            let impulse = random_unit_vector(rng) * (noise_val * treble * p.treble_impulse_scale);

            // Damping keeps the accumulated impulses bounded
            particle.offset += impulse;
            particle.offset *= p.offset_damping;

            particle.size_m = rng.gen_range(p.particle_size_m.0..p.particle_size_m.1)
                + treble * p.treble_size_scale;
        }
    }

    pub(super) fn recycle<R: Rng>(
        &mut self,
        params: &ClusterParams,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        self.position.z = params.placement.respawn_depth(camera_depth_m, rng);
        self.generate_cloud(params, rng);
    }

    pub fn depth_m(&self) -> f32 {
        self.position.z
    }

    pub fn particles(&self) -> &[ClusterParticle] {
        &self.particles
    }

    pub fn render_data(
        &self,
        params: &ClusterParams,
        energy: &EnergyState,
    ) -> ClusterRenderData<'_> {
        ClusterRenderData {
            position: self.position,
            particles: &self.particles,
            brightness: band_brightness(energy.smoothed_treble, params.brightness),
        }
    }
}

/// Render hand-off: one small sphere per particle around the center
pub struct ClusterRenderData<'a> {
    pub position: Vec3,
    pub particles: &'a [ClusterParticle],
    pub brightness: f32,
}
