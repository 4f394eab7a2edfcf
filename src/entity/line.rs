//! Morphing line: a treble-driven strip of control points between two anchors.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::UpdateContext;
use crate::energy::EnergyState;
use crate::noise::random_unit_vector;
use crate::params::{band_brightness, FieldExtent, LineParams};

/// One interior control point of the line
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Current world position (meters)
    pub position: Vec3,
    base_position: Vec3,
    noise_offset: f32,
}

/// Treble-responsive line strip spanning two independently placed anchors
pub struct MorphingLine {
    start: Vec3,
    end: Vec3,
    points: Vec<ControlPoint>,
    morph_phase: f32,
}

impl MorphingLine {
    pub fn spawn<R: Rng>(
        params: &LineParams,
        extent: &FieldExtent,
        camera_depth_m: f32,
        rng: &mut R,
    ) -> Self {
        let mut line = Self {
            start: params.placement.spawn_position(extent, camera_depth_m, rng),
            end: params.placement.spawn_position(extent, camera_depth_m, rng),
            points: Vec::new(),
            morph_phase: rng.gen_range(0.0..TAU),
        };
        line.generate_points(params, rng);
        line
    }

    /// Rebuild the control points as an even subdivision of the span; the
    /// count is redrawn, never partially resized.
    fn generate_points<R: Rng>(&mut self, params: &LineParams, rng: &mut R) {
        let count = rng
            .gen_range(params.point_count.0..=params.point_count.1)
            .max(2);

        self.points = (0..count)
            .map(|i| {
                let t = i as f32 / (count - 1) as f32;
                let base_position = self.start.lerp(self.end, t);
                ControlPoint {
                    position: base_position,
                    base_position,
                    noise_offset: rng.gen_range(0.0..1000.0),
                }
            })
            .collect();
    }

    pub(super) fn animate<R: Rng>(&mut self, ctx: &UpdateContext<'_>, rng: &mut R) {
        let p = &ctx.config.line;
        let treble = ctx.energy.smoothed_treble;

        self.morph_phase += p.morph_rate + treble * p.treble_morph_scale;
        let morph_phase = self.morph_phase;
        let treble_influence = treble * p.treble_stretch_scale;

        for (i, point) in self.points.iter_mut().enumerate() {
            point.noise_offset += p.point_noise_rate;
            let noise_val =
                ctx.field.sample(point.noise_offset + ctx.noise_phase * p.noise_phase_scale);
            let morph = (morph_phase + i as f32 * p.point_phase_spread).sin() * treble_influence;

            // Displacement decays back to the base span when treble fades
            let offset = random_unit_vector(rng) * (noise_val * treble_influence + morph);
            point.position = point.base_position + offset;
        }
    }

    pub(super) fn recycle<R: Rng>(
        &mut self,
        params: &LineParams,
        camera_depth_m: f32,
        rng: &mut R,
    ) {
        self.start.z = params.placement.respawn_depth(camera_depth_m, rng);
        self.end.z = params.placement.respawn_depth(camera_depth_m, rng);
        self.generate_points(params, rng);
    }

    /// Recycling tracks the start anchor
    pub fn depth_m(&self) -> f32 {
        self.start.z
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn render_data(&self, params: &LineParams, energy: &EnergyState) -> LineRenderData<'_> {
        LineRenderData {
            points: &self.points,
            brightness: band_brightness(energy.smoothed_treble, params.brightness),
            stroke_weight: params.base_stroke_weight
                + energy.smoothed_treble * params.treble_stroke_scale,
        }
    }
}

/// Render hand-off: a polyline through the control points
pub struct LineRenderData<'a> {
    pub points: &'a [ControlPoint],
    pub brightness: f32,
    pub stroke_weight: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::Fixture;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_point_count_within_configured_range() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(51);

        for _ in 0..50 {
            let line = MorphingLine::spawn(&fixture.config.line, &fixture.config.field, 0.0, &mut rng);
            let count = line.points().len();
            assert!(count >= fixture.config.line.point_count.0);
            assert!(count <= fixture.config.line.point_count.1);
        }
    }

    #[test]
    fn test_points_interpolate_between_anchors() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(52);
        let line = MorphingLine::spawn(&fixture.config.line, &fixture.config.field, 0.0, &mut rng);

        let points = line.points();
        assert_eq!(points.first().unwrap().position, line.start);
        assert!(points.last().unwrap().position.distance(line.end) < 1e-2);
    }

    #[test]
    fn test_points_rest_on_span_at_zero_treble() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(53);
        let mut line = MorphingLine::spawn(&fixture.config.line, &fixture.config.field, 0.0, &mut rng);

        for _ in 0..20 {
            line.animate(&fixture.ctx(0.0), &mut rng);
        }
        for point in line.points() {
            assert_eq!(point.position, point.base_position);
        }
    }

    #[test]
    fn test_treble_displaces_points_boundedly() {
        let fixture = Fixture::new(0.0, 0.0, 255.0);
        let mut rng = StdRng::seed_from_u64(54);
        let mut line = MorphingLine::spawn(&fixture.config.line, &fixture.config.field, 0.0, &mut rng);

        // Offset is recomputed from the base each frame, so it cannot accumulate
        let max_offset = 255.0 * fixture.config.line.treble_stretch_scale * 2.0;
        let mut displaced = false;
        for _ in 0..50 {
            line.animate(&fixture.ctx(0.0), &mut rng);
            for point in line.points() {
                let offset = (point.position - point.base_position).length();
                assert!(offset <= max_offset + 1e-3);
                displaced |= offset > 0.0;
            }
        }
        assert!(displaced);
    }

    #[test]
    fn test_recycle_moves_both_anchors_ahead() {
        let fixture = Fixture::new(0.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(55);
        let mut line = MorphingLine::spawn(&fixture.config.line, &fixture.config.field, 0.0, &mut rng);

        line.recycle(&fixture.config.line, 10_000.0, &mut rng);

        let min = 10_000.0 + fixture.config.line.placement.respawn_depth_m.0;
        assert!(line.start.z >= min);
        assert!(line.end.z >= min);
        assert_eq!(line.points().first().unwrap().position, line.start);
    }
}
