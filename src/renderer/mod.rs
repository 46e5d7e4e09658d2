//! WebGPU rendering module
//!
//! Scene building and batching are plain data and run anywhere; only the
//! pipeline touches the GPU.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::{Batch, FrameBatches};
pub use pipeline::RenderState;
pub use scene::{Backdrop, DrawCmd, SceneOptions, build_scene};
