//! Scene: entities, interaction, configuration and the frame driver.

pub mod config;
pub mod context;
pub mod entity;
pub mod interaction;
pub mod pipeline;
pub mod registry;

pub use config::SceneConfig;
pub use context::FrameContext;
pub use entity::{Category, Entity, EntityRecord};
pub use interaction::{Interaction, InteractionEvent};
pub use pipeline::{AdaptivePipeline, FrameOutput};
pub use registry::{load_records, EntityRegistry, SyncReport};
