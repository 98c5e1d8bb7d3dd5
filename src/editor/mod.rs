//! Editor orchestration: the voxel world and its notifications

pub mod notify;
pub mod world;

pub use notify::{ColorsUsedListener, SubscriptionId, Subscribers};
pub use world::{EditOutcome, VoxelWorld};
