mod animator;
mod bounding_box;
mod frame_stream;
mod generator;
mod parser;
mod particle;
mod particle_file;
mod xyz;

pub use animator::{FrameAnimator, FrameRenderer};
pub use bounding_box::BoundingBox;
pub use frame_stream::{Frame, FrameStream, FRAME_STREAM_DELIMITER};
pub use generator::{
    generate_particle_file, ClusterSpec, GeneratorConfig, GeneratorError, SamplingRange,
};
pub use parser::{ParseResult, ParsingError};
pub use particle::{ParticleRecord, PARTICLE_FIELDS};
pub use particle_file::{ParticleFile, ReadMode};
pub use xyz::{distance, XYZ};
