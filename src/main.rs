//! Frequency Garden - a headless demo drive through the garden
//!
//! Feeds the scene a synthetic band envelope (slow sinusoids plus periodic
//! bass kicks) in place of a live audio analyzer and logs how the garden
//! evolves. A rendering front end would consume the same `Scene` API.

mod cli;

use clap::Parser;

use frequency_garden::energy::BandSample;
use frequency_garden::entity::Kind;
use frequency_garden::params::GardenConfig;
use frequency_garden::scene::Scene;

use cli::Args;

/// Synthetic band envelope standing in for the audio analyzer.
///
/// Bands drift as offset sinusoids in the middle of the [0, 255] scale; every
/// `kick_interval` frames the bass spikes hard enough to fire an onset.
fn demo_bands(frame: u64, kick_interval: u64) -> BandSample {
    let t = frame as f32;
    let mut bass = 60.0 + (t * 0.050).sin() * 40.0;
    let mid = 50.0 + (t * 0.031 + 1.0).sin() * 35.0;
    let treble = 40.0 + (t * 0.047 + 2.0).sin() * 30.0;

    if kick_interval > 0 && frame % kick_interval == 0 && frame > 0 {
        bass += 120.0;
    }

    BandSample::new(bass, mid, treble)
}

fn print_summary(scene: &Scene) {
    let transform = scene.camera_transform();
    let energy = scene.energy();
    println!(
        "frame {:>6}  depth {:>9.1}m  yaw {:>7.4}rad  status: {}",
        scene.frame(),
        scene.depth_m(),
        transform.yaw_rad,
        scene.status()
    );
    println!(
        "  bands: bass {:>5.1} / mid {:>5.1} / treble {:>5.1} (smoothed)",
        energy.smoothed_bass, energy.smoothed_mid, energy.smoothed_treble
    );
    println!(
        "  pools: mass {} / cluster {} / vine {} / smoke {} / line {}",
        scene.pool_len(Kind::Mass),
        scene.pool_len(Kind::Cluster),
        scene.pool_len(Kind::Vine),
        scene.pool_len(Kind::Smoke),
        scene.pool_len(Kind::Line)
    );
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = GardenConfig {
        noise_seed: args.seed,
        ..GardenConfig::default()
    };
    let mut scene = Scene::new(config);
    println!("status: {}", scene.status());

    // The demo has no real asset or audio context; both callbacks succeed
    scene.on_load(Ok(()));
    scene.begin_context_init();
    scene.on_context_init(Ok(()));
    scene.toggle();
    println!("status: {}", scene.status());

    let pause_at = args.frames / 2;
    let mut frame = 0;
    while frame < args.frames {
        if args.pause_frames > 0 && frame == pause_at {
            scene.toggle();
            println!("status: {}", scene.status());
            for _ in 0..args.pause_frames {
                scene.step(demo_bands(frame, args.kick_interval));
            }
            scene.toggle();
            println!("status: {}", scene.status());
        }

        scene.step(demo_bands(frame, args.kick_interval));
        frame += 1;

        if args.summary_every > 0 && frame % args.summary_every == 0 {
            print_summary(&scene);
        }
    }

    print_summary(&scene);
    let lighting = scene.lighting();
    println!(
        "lighting: directional {:?}, bass point {}, treble point {}",
        lighting.directional_rgb,
        if lighting.bass_point.is_some() { "on" } else { "off" },
        if lighting.treble_point.is_some() { "on" } else { "off" }
    );
}
