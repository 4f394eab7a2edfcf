//! Per-kind entity pools: seeding, per-frame updates, and onset bursts.
//!
//! Pools never shrink. Baseline entities are recycled in place when they
//! fall behind the camera; onset transients append extra entities up to a
//! hard ceiling, after which bursts are dropped.

use rand::Rng;

use crate::energy::Band;
use crate::entity::{Entity, Kind, UpdateContext};
use crate::params::GardenConfig;

/// All five kind pools
pub struct Population {
    mass: Vec<Entity>,
    cluster: Vec<Entity>,
    vine: Vec<Entity>,
    smoke: Vec<Entity>,
    line: Vec<Entity>,
}

/// Kinds burst-spawned when a band fires an onset
fn burst_kinds(band: Band) -> [Kind; 2] {
    match band {
        Band::Bass => [Kind::Mass, Kind::Smoke],
        Band::Mid => [Kind::Vine, Kind::Vine],
        Band::Treble => [Kind::Cluster, Kind::Line],
    }
}

impl Population {
    /// Seed every pool to its target size
    pub fn seed<R: Rng>(config: &GardenConfig, camera_depth_m: f32, rng: &mut R) -> Self {
        let p = &config.population;
        let fill = |kind: Kind, target: usize, rng: &mut R| -> Vec<Entity> {
            (0..target)
                .map(|_| Entity::spawn(kind, config, camera_depth_m, rng))
                .collect()
        };

        Self {
            mass: fill(Kind::Mass, p.mass_target, rng),
            cluster: fill(Kind::Cluster, p.cluster_target, rng),
            vine: fill(Kind::Vine, p.vine_target, rng),
            smoke: fill(Kind::Smoke, p.smoke_target, rng),
            line: fill(Kind::Line, p.line_target, rng),
        }
    }

    fn pool(&self, kind: Kind) -> &Vec<Entity> {
        match kind {
            Kind::Mass => &self.mass,
            Kind::Cluster => &self.cluster,
            Kind::Vine => &self.vine,
            Kind::Smoke => &self.smoke,
            Kind::Line => &self.line,
        }
    }

    fn pool_mut(&mut self, kind: Kind) -> &mut Vec<Entity> {
        match kind {
            Kind::Mass => &mut self.mass,
            Kind::Cluster => &mut self.cluster,
            Kind::Vine => &mut self.vine,
            Kind::Smoke => &mut self.smoke,
            Kind::Line => &mut self.line,
        }
    }

    fn target(config: &GardenConfig, kind: Kind) -> usize {
        let p = &config.population;
        match kind {
            Kind::Mass => p.mass_target,
            Kind::Cluster => p.cluster_target,
            Kind::Vine => p.vine_target,
            Kind::Smoke => p.smoke_target,
            Kind::Line => p.line_target,
        }
    }

    /// Current pool size for one kind
    pub fn len(&self, kind: Kind) -> usize {
        self.pool(kind).len()
    }

    /// Total entity count across all pools
    pub fn total(&self) -> usize {
        Kind::ALL.iter().map(|&kind| self.len(kind)).sum()
    }

    /// Advance every entity one frame (no-ops while the playing gate is down)
    pub fn update<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        for kind in Kind::ALL {
            for entity in self.pool_mut(kind) {
                entity.update(ctx, rng);
            }
        }
    }

    /// Refill any pool that has fallen below its target. Pools are recycled
    /// in place and never drained in steady state, so this is defensive.
    pub fn top_up<R: Rng>(&mut self, config: &GardenConfig, camera_depth_m: f32, rng: &mut R) {
        for kind in Kind::ALL {
            let target = Self::target(config, kind);
            let pool = self.pool_mut(kind);
            if pool.len() < target {
                log::warn!("{:?} pool below target ({} < {}), topping up", kind, pool.len(), target);
            }
            while pool.len() < target {
                pool.push(Entity::spawn(kind, config, camera_depth_m, rng));
            }
        }
    }

    /// Burst-spawn the kinds mapped to each onset band, respecting per-kind
    /// ceilings. Drops past the ceiling are intentional, not an error.
    pub fn spawn_for_onsets<R: Rng>(
        &mut self,
        onsets: &[Band],
        config: &GardenConfig,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        for &band in onsets {
            for kind in burst_kinds(band) {
                let ceiling = Self::target(config, kind) * config.population.ceiling_factor;
                let pool = self.pool_mut(kind);
                if pool.len() >= ceiling {
                    log::debug!("{:?} pool at ceiling {}, dropping burst spawn", kind, ceiling);
                    continue;
                }
                pool.push(Entity::spawn(kind, config, camera_depth_m, rng));
            }
        }
    }

    /// Iterate every entity across all pools
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.mass
            .iter()
            .chain(&self.cluster)
            .chain(&self.vine)
            .chain(&self.smoke)
            .chain(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::Fixture;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_fills_every_pool_to_target() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(61);
        let population = Population::seed(&fixture.config, 0.0, &mut rng);

        let p = &fixture.config.population;
        assert_eq!(population.len(Kind::Mass), p.mass_target);
        assert_eq!(population.len(Kind::Cluster), p.cluster_target);
        assert_eq!(population.len(Kind::Vine), p.vine_target);
        assert_eq!(population.len(Kind::Smoke), p.smoke_target);
        assert_eq!(population.len(Kind::Line), p.line_target);
        assert_eq!(population.total(), population.iter().count());
    }

    #[test]
    fn test_top_up_refills_a_short_pool() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(66);

        let mut small = fixture.config.clone();
        small.population.line_target = 2;
        let mut population = Population::seed(&small, 0.0, &mut rng);
        assert_eq!(population.len(Kind::Line), 2);

        // Raising the target leaves the pool short until the next top-up
        population.top_up(&fixture.config, 0.0, &mut rng);
        assert_eq!(population.len(Kind::Line), fixture.config.population.line_target);

        // At or above target, top-up changes nothing
        let total = population.total();
        population.top_up(&fixture.config, 0.0, &mut rng);
        assert_eq!(population.total(), total);
    }

    #[test]
    fn test_bass_onset_bursts_mass_and_smoke() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(62);
        let mut population = Population::seed(&fixture.config, 0.0, &mut rng);

        let before_mass = population.len(Kind::Mass);
        let before_smoke = population.len(Kind::Smoke);
        let before_total = population.total();

        population.spawn_for_onsets(&[Band::Bass], &fixture.config, 0.0, &mut rng);

        assert_eq!(population.len(Kind::Mass), before_mass + 1);
        assert_eq!(population.len(Kind::Smoke), before_smoke + 1);
        assert_eq!(population.total(), before_total + 2);
    }

    #[test]
    fn test_mid_onset_bursts_two_vines() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(63);
        let mut population = Population::seed(&fixture.config, 0.0, &mut rng);

        let before = population.len(Kind::Vine);
        population.spawn_for_onsets(&[Band::Mid], &fixture.config, 0.0, &mut rng);
        assert_eq!(population.len(Kind::Vine), before + 2);
    }

    #[test]
    fn test_burst_spawns_respect_ceiling() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(64);
        let mut population = Population::seed(&fixture.config, 0.0, &mut rng);

        let p = &fixture.config.population;
        let ceiling = p.vine_target * p.ceiling_factor;
        for _ in 0..ceiling {
            population.spawn_for_onsets(&[Band::Mid], &fixture.config, 0.0, &mut rng);
        }

        assert_eq!(population.len(Kind::Vine), ceiling);
    }

    #[test]
    fn test_entities_stay_within_depth_window() {
        let fixture = Fixture::new(100.0, 80.0, 60.0);
        let mut rng = StdRng::seed_from_u64(65);
        let mut population = Population::seed(&fixture.config, 0.0, &mut rng);

        let max_behind = fixture.config.smoke.placement.recycle_distance_m;
        let max_ahead = fixture.config.max_spawn_ahead_m();

        // March the camera forward far enough to force many recycles
        for frame in 0..2_000u32 {
            let camera_depth_m = frame as f32 * 3.0;
            let ctx = fixture.ctx(camera_depth_m);
            population.update(&ctx, &mut rng);

            for entity in population.iter() {
                let depth = entity.reference_depth_m();
                assert!(depth >= camera_depth_m - max_behind);
                assert!(depth <= camera_depth_m + max_ahead);
            }
        }
    }
}
