//! Frequency Garden library - audio-driven generative 3D garden core

pub mod camera;
pub mod energy;
pub mod entity;
pub mod error;
pub mod lighting;
pub mod noise;
pub mod params;
pub mod playback;
pub mod population;
pub mod scene;
