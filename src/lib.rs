pub mod constants;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod host;
pub mod selector;
pub mod slot;
pub mod state;
pub mod text;
pub mod time;
pub mod transition;

#[cfg(feature = "raylib-host")]
pub mod raylib_host;
#[cfg(feature = "raylib-host")]
pub mod texture_loader;

pub use coordinator::{DisplayCoordinator, DisplayState, TickReport};
pub use error::WatchError;
pub use selector::{ImageId, ImageTable, select_image};
pub use time::{ClockStyle, WatchTime};
pub use transition::{TransitionController, TransitionOutcome};
