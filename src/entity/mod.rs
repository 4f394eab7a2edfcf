//! The five organic entity kinds and their shared update/recycle skeleton.
//!
//! Every kind owns its geometry and follows the same per-frame template:
//! freeze while paused, animate from its driving energy band, then recycle in
//! place once its reference depth falls behind the camera's recycling plane.
//! Recycling reseeds the entity ahead of the camera and regenerates its whole
//! substructure; it never resizes it partially and never reallocates the pool
//! slot.

pub mod cluster;
pub mod line;
pub mod mass;
pub mod smoke;
pub mod vine;

pub use cluster::{ClusterParticle, ClusterRenderData, ParticleCluster};
pub use line::{ControlPoint, LineRenderData, MorphingLine};
pub use mass::{MassRenderData, OrganicMass, RingVertex};
pub use smoke::{SmokePuff, SmokeRenderData};
pub use vine::{CreepingVine, VineRenderData, VineSegment};

use glam::Vec3;
use rand::Rng;

use crate::energy::EnergyState;
use crate::noise::NoiseField;
use crate::params::{GardenConfig, PlacementBand};

/// Entity kind tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Mass,
    Cluster,
    Vine,
    Smoke,
    Line,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::Mass, Kind::Cluster, Kind::Vine, Kind::Smoke, Kind::Line];
}

/// Per-frame inputs shared by every entity update
pub struct UpdateContext<'a> {
    /// Global playing gate; updates are no-ops while false
    pub playing: bool,

    /// Camera forward position this frame (meters); defines the recycling plane
    pub camera_depth_m: f32,

    /// Global noise phase from the scene clock
    pub noise_phase: f32,

    pub energy: &'a EnergyState,
    pub field: &'a NoiseField,
    pub config: &'a GardenConfig,
}

/// One organic entity, tagged by kind
pub enum Entity {
    Mass(OrganicMass),
    Cluster(ParticleCluster),
    Vine(CreepingVine),
    Smoke(SmokePuff),
    Line(MorphingLine),
}

impl Entity {
    /// Construct a fresh entity of `kind`, placed ahead of the camera
    pub fn spawn<R: Rng>(
        kind: Kind,
        config: &GardenConfig,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        match kind {
            Kind::Mass => {
                Entity::Mass(OrganicMass::spawn(&config.mass, &config.field, camera_depth_m, rng))
            }
            Kind::Cluster => Entity::Cluster(ParticleCluster::spawn(
                &config.cluster,
                &config.field,
                camera_depth_m,
                rng,
            )),
            Kind::Vine => {
                Entity::Vine(CreepingVine::spawn(&config.vine, &config.field, camera_depth_m, rng))
            }
            Kind::Smoke => {
                Entity::Smoke(SmokePuff::spawn(&config.smoke, &config.field, camera_depth_m, rng))
            }
            Kind::Line => {
                Entity::Line(MorphingLine::spawn(&config.line, &config.field, camera_depth_m, rng))
            }
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Entity::Mass(_) => Kind::Mass,
            Entity::Cluster(_) => Kind::Cluster,
            Entity::Vine(_) => Kind::Vine,
            Entity::Smoke(_) => Kind::Smoke,
            Entity::Line(_) => Kind::Line,
        }
    }

    /// Depth tested against the recycling plane (start depth for lines)
    pub fn reference_depth_m(&self) -> f32 {
        match self {
            Entity::Mass(mass) => mass.depth_m(),
            Entity::Cluster(cluster) => cluster.depth_m(),
            Entity::Vine(vine) => vine.depth_m(),
            Entity::Smoke(smoke) => smoke.depth_m(),
            Entity::Line(line) => line.depth_m(),
        }
    }

    /// Current substructure element count (0 for smoke puffs)
    pub fn substructure_len(&self) -> usize {
        match self {
            Entity::Mass(mass) => mass.ring().len(),
            Entity::Cluster(cluster) => cluster.particles().len(),
            Entity::Vine(vine) => vine.segments().len(),
            Entity::Smoke(_) => 0,
            Entity::Line(line) => line.points().len(),
        }
    }

    fn placement<'a>(&self, config: &'a GardenConfig) -> &'a PlacementBand {
        match self {
            Entity::Mass(_) => &config.mass.placement,
            Entity::Cluster(_) => &config.cluster.placement,
            Entity::Vine(_) => &config.vine.placement,
            Entity::Smoke(_) => &config.smoke.placement,
            Entity::Line(_) => &config.line.placement,
        }
    }

    /// Advance one frame: animate, then recycle if behind the camera.
    ///
    /// A no-op while the playing gate is down, so paused scenes stay frozen
    /// bit for bit.
    pub fn update<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        if !ctx.playing {
            return;
        }

        match self {
            Entity::Mass(mass) => mass.animate(ctx),
            Entity::Cluster(cluster) => cluster.animate(ctx, rng),
            Entity::Vine(vine) => vine.animate(ctx),
            Entity::Smoke(smoke) => smoke.animate(ctx, rng),
            Entity::Line(line) => line.animate(ctx, rng),
        }

        let recycle_distance_m = self.placement(ctx.config).recycle_distance_m;
        if self.reference_depth_m() < ctx.camera_depth_m - recycle_distance_m {
            self.recycle(ctx, rng);
        }
    }

    fn recycle<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        match self {
            Entity::Mass(mass) => mass.recycle(&ctx.config.mass, ctx.camera_depth_m, rng),
            Entity::Cluster(cluster) => {
                cluster.recycle(&ctx.config.cluster, ctx.camera_depth_m, rng)
            }
            Entity::Vine(vine) => vine.recycle(&ctx.config.vine, ctx.camera_depth_m, rng),
            Entity::Smoke(smoke) => smoke.recycle(&ctx.config.smoke, ctx.camera_depth_m, rng),
            Entity::Line(line) => line.recycle(&ctx.config.line, ctx.camera_depth_m, rng),
        }
    }

    /// Read-only view consumed by the rendering collaborator
    pub fn render_data<'a>(
        &'a self,
        energy: &EnergyState,
        config: &GardenConfig,
    ) -> RenderData<'a> {
        match self {
            Entity::Mass(mass) => RenderData::Mass(mass.render_data(&config.mass, energy)),
            Entity::Cluster(cluster) => {
                RenderData::Cluster(cluster.render_data(&config.cluster, energy))
            }
            Entity::Vine(vine) => RenderData::Vine(vine.render_data(&config.vine, energy)),
            Entity::Smoke(smoke) => RenderData::Smoke(smoke.render_data(&config.smoke, energy)),
            Entity::Line(line) => RenderData::Line(line.render_data(&config.line, energy)),
        }
    }
}

/// Render hand-off for one entity
pub enum RenderData<'a> {
    Mass(MassRenderData<'a>),
    Cluster(ClusterRenderData<'a>),
    Vine(VineRenderData<'a>),
    Smoke(SmokeRenderData),
    Line(LineRenderData<'a>),
}

impl RenderData<'_> {
    /// World anchor of the entity (first control point for lines)
    pub fn anchor(&self) -> Vec3 {
        match self {
            RenderData::Mass(mass) => mass.position,
            RenderData::Cluster(cluster) => cluster.position,
            RenderData::Vine(vine) => vine.position,
            RenderData::Smoke(smoke) => smoke.position,
            RenderData::Line(line) => line.points[0].position,
        }
    }

    /// Brightness derived from the kind's driving smoothed band
    pub fn brightness(&self) -> f32 {
        match self {
            RenderData::Mass(mass) => mass.brightness,
            RenderData::Cluster(cluster) => cluster.brightness,
            RenderData::Vine(vine) => vine.brightness,
            RenderData::Smoke(smoke) => smoke.brightness,
            RenderData::Line(line) => line.brightness,
        }
    }
}
