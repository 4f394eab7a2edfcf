//! Scene orchestration: the per-frame pipeline tying energy, camera, clock,
//! population, and lighting together behind the playback gate.
//!
//! Per playing frame, in order: ingest the band sample, advance the camera,
//! advance the clock, update every entity, then burst-spawn for onsets.
//! While not playing only the idle camera bob runs; everything else stays
//! frozen.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{CameraSystem, CameraTransform};
use crate::energy::{BandSample, EnergyState};
use crate::entity::{Entity, Kind, RenderData, UpdateContext};
use crate::error::Result;
use crate::lighting::LightingRig;
use crate::noise::NoiseField;
use crate::params::{ClockParams, GardenConfig};
use crate::playback::{Playback, PlaybackState};
use crate::population::Population;

/// Virtual time and global noise phase, advanced once per playing frame
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneClock {
    /// Virtual elapsed time (seconds)
    pub time_s: f32,

    /// Global noise phase (field offset units)
    pub noise_phase: f32,
}

impl SceneClock {
    pub fn advance(&mut self, params: &ClockParams) {
        self.time_s += params.time_step_s;
        self.noise_phase += params.noise_phase_step;
    }
}

/// One garden session
pub struct Scene {
    config: GardenConfig,
    playback: Playback,
    energy: EnergyState,
    camera: CameraSystem,
    clock: SceneClock,
    field: NoiseField,
    population: Population,
    rng: StdRng,
    frame: u64,
}

impl Scene {
    pub fn new(config: GardenConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.noise_seed as u64);
        let field = NoiseField::new(config.noise_seed);
        let camera = CameraSystem::new(config.camera.clone());
        let population = Population::seed(&config, camera.depth_m(), &mut rng);

        log::info!(
            "garden seeded: {} entities, noise seed {}",
            population.total(),
            config.noise_seed
        );

        Self {
            config,
            playback: Playback::new(),
            energy: EnergyState::default(),
            camera,
            clock: SceneClock::default(),
            field,
            population,
            rng,
            frame: 0,
        }
    }

    /// Feed the asset loader callback outcome
    pub fn on_load(&mut self, outcome: Result<()>) {
        self.playback.on_load(outcome);
    }

    /// Mark the start of an audio-context activation attempt
    pub fn begin_context_init(&mut self) {
        self.playback.begin_context_init();
    }

    /// Feed the audio-context activation outcome
    pub fn on_context_init(&mut self, outcome: Result<()>) {
        self.playback.on_context_init(outcome);
    }

    /// Toggle play/pause (no-op with a status message when preconditions fail)
    pub fn toggle(&mut self) {
        self.playback.toggle();
        log::debug!("playback toggled: {:?}", self.playback.state());
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Status line for the display side channel
    pub fn status(&self) -> &'static str {
        self.playback.status()
    }

    /// Advance one frame with a fresh band sample from the audio collaborator.
    ///
    /// All scene mutation is gated on the playing state; a paused or stopped
    /// frame only advances the idle camera bob.
    pub fn step(&mut self, sample: BandSample) {
        self.frame += 1;

        if !self.playback.is_playing() {
            self.camera.idle(self.frame);
            return;
        }

        self.energy.update(sample, self.config.smoothing.energy_alpha);
        self.camera.advance(&self.clock, &self.energy);
        self.clock.advance(&self.config.clock);

        let ctx = UpdateContext {
            playing: true,
            camera_depth_m: self.camera.depth_m(),
            noise_phase: self.clock.noise_phase,
            energy: &self.energy,
            field: &self.field,
            config: &self.config,
        };
        self.population.update(&ctx, &mut self.rng);
        self.population
            .top_up(&self.config, self.camera.depth_m(), &mut self.rng);

        let onsets = self.energy.onsets(self.config.smoothing.onset_threshold);
        if !onsets.is_empty() {
            log::debug!("onsets detected: {:?}", onsets);
            self.population.spawn_for_onsets(
                &onsets,
                &self.config,
                self.camera.depth_m(),
                &mut self.rng,
            );
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn depth_m(&self) -> f32 {
        self.camera.depth_m()
    }

    pub fn clock(&self) -> SceneClock {
        self.clock
    }

    pub fn energy(&self) -> &EnergyState {
        &self.energy
    }

    pub fn camera_transform(&self) -> CameraTransform {
        self.camera.transform()
    }

    /// Lighting rig for the current frame
    pub fn lighting(&self) -> LightingRig {
        LightingRig::derive(
            &self.config.lighting,
            &self.energy,
            self.clock.time_s,
            self.camera.depth_m(),
            self.playback.is_playing(),
        )
    }

    pub fn pool_len(&self, kind: Kind) -> usize {
        self.population.len(kind)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.population.iter()
    }

    /// Render hand-off for every entity
    pub fn render_entities(&self) -> impl Iterator<Item = RenderData<'_>> {
        self.population
            .iter()
            .map(|entity| entity.render_data(&self.energy, &self.config))
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_scene() -> Scene {
        let mut scene = Scene::new(GardenConfig::default());
        scene.on_load(Ok(()));
        scene.on_context_init(Ok(()));
        scene.toggle();
        scene
    }

    #[test]
    fn test_steps_are_no_ops_until_playing() {
        let mut scene = Scene::new(GardenConfig::default());
        let total = scene.entities().count();

        for _ in 0..10 {
            scene.step(BandSample::new(200.0, 200.0, 200.0));
        }

        assert_eq!(scene.depth_m(), 0.0);
        assert_eq!(scene.clock().time_s, 0.0);
        assert_eq!(scene.entities().count(), total);
        assert_eq!(scene.energy().total_smoothed(), 0.0);
    }

    #[test]
    fn test_playing_frame_advances_camera_and_clock() {
        let mut scene = playing_scene();

        scene.step(BandSample::new(100.0, 50.0, 25.0));
        assert!(scene.depth_m() > 0.0);
        assert_eq!(scene.clock().time_s, scene.config().clock.time_step_s);
        assert!(scene.energy().total_smoothed() > 0.0);
    }

    #[test]
    fn test_pause_freezes_depth_and_clock() {
        let mut scene = playing_scene();
        for _ in 0..30 {
            scene.step(BandSample::new(100.0, 100.0, 100.0));
        }

        scene.toggle();
        assert!(!scene.is_playing());

        let depth = scene.depth_m();
        let clock = scene.clock();
        let energy = scene.energy().total_smoothed();
        for _ in 0..30 {
            scene.step(BandSample::new(255.0, 255.0, 255.0));
        }

        assert_eq!(scene.depth_m(), depth);
        assert_eq!(scene.clock().time_s, clock.time_s);
        assert_eq!(scene.clock().noise_phase, clock.noise_phase);
        assert_eq!(scene.energy().total_smoothed(), energy);
    }

    #[test]
    fn test_resume_continues_from_frozen_state() {
        let mut scene = playing_scene();
        scene.step(BandSample::new(100.0, 100.0, 100.0));

        scene.toggle();
        for _ in 0..10 {
            scene.step(BandSample::new(0.0, 0.0, 0.0));
        }
        let depth = scene.depth_m();

        scene.toggle();
        scene.step(BandSample::new(0.0, 0.0, 0.0));
        assert!(scene.depth_m() > depth);
    }

    #[test]
    fn test_transient_bursts_only_the_mapped_pools() {
        let mut scene = playing_scene();

        // First frame establishes the raw baseline below the onset threshold
        scene.step(BandSample::new(10.0, 10.0, 10.0));
        let mass = scene.pool_len(Kind::Mass);
        let smoke = scene.pool_len(Kind::Smoke);
        let vine = scene.pool_len(Kind::Vine);
        let cluster = scene.pool_len(Kind::Cluster);
        let line = scene.pool_len(Kind::Line);

        // Bass jumps by 90 (> threshold 80); mid and treble stay flat
        scene.step(BandSample::new(100.0, 10.0, 10.0));

        assert_eq!(scene.pool_len(Kind::Mass), mass + 1);
        assert_eq!(scene.pool_len(Kind::Smoke), smoke + 1);
        assert_eq!(scene.pool_len(Kind::Vine), vine);
        assert_eq!(scene.pool_len(Kind::Cluster), cluster);
        assert_eq!(scene.pool_len(Kind::Line), line);
    }

    #[test]
    fn test_long_session_keeps_the_garden_around_the_camera() {
        let mut scene = playing_scene();
        let max_behind = scene.config().smoke.placement.recycle_distance_m;
        let max_ahead = scene.config().max_spawn_ahead_m();

        // A full demo run with periodic bass kicks firing onset bursts
        for frame in 0..600u64 {
            let t = frame as f32;
            let kick = if frame % 90 == 0 { 120.0 } else { 0.0 };
            scene.step(BandSample::new(
                60.0 + (t * 0.05).sin() * 40.0 + kick,
                50.0 + (t * 0.031).sin() * 35.0,
                40.0 + (t * 0.047).sin() * 30.0,
            ));
        }

        let depth = scene.depth_m();
        assert!(depth > 600.0 * scene.config().camera.base_forward_speed_m);

        for entity in scene.entities() {
            let entity_depth = entity.reference_depth_m();
            assert!(entity_depth >= depth - max_behind);
            assert!(entity_depth <= depth + max_ahead);
        }

        let p = &scene.config().population;
        for (kind, target) in [
            (Kind::Mass, p.mass_target),
            (Kind::Cluster, p.cluster_target),
            (Kind::Vine, p.vine_target),
            (Kind::Smoke, p.smoke_target),
            (Kind::Line, p.line_target),
        ] {
            let len = scene.pool_len(kind);
            assert!(len >= target, "{:?} pool shrank below target", kind);
            assert!(len <= target * p.ceiling_factor, "{:?} pool passed ceiling", kind);
        }
    }

    #[test]
    fn test_lighting_follows_playback_gate() {
        let mut scene = playing_scene();
        for _ in 0..200 {
            scene.step(BandSample::new(255.0, 255.0, 255.0));
        }

        let playing = scene.lighting();
        assert!(playing.bass_point.is_some());

        scene.toggle();
        let paused = scene.lighting();
        assert!(paused.bass_point.is_none());
        assert_eq!(
            paused.directional_rgb,
            scene.config().lighting.paused_directional_rgb
        );
    }
}
