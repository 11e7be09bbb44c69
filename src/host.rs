use crate::error::WatchError;
use crate::geometry::{Rect, Size};
use crate::selector::ImageId;
use crate::slot::SlotIndex;

/// Visual nodes the core asks the host to arrange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Parent of both slot nodes; fills the image region.
    ImageRoot,
    Slot(SlotIndex),
}

/// A materialized image. Owned by exactly one slot until handed back with
/// [`ResourceService::free`].
#[derive(Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub image: ImageId,
    /// Host-side key of the decoded resource.
    pub handle: u32,
    pub size: Size,
}

pub trait ResourceService {
    /// Decodes `image`; fails with [`WatchError::ResourceUnavailable`].
    fn materialize(&mut self, image: ImageId) -> Result<Bitmap, WatchError>;
    fn free(&mut self, bitmap: Bitmap);
}

pub trait LayerTree {
    /// Binds the bitmap a node draws, or clears it.
    fn bind(&mut self, node: NodeId, bitmap: Option<&Bitmap>);
    /// Adds `node` as the top-most child of `parent`.
    fn attach(&mut self, node: NodeId, parent: NodeId);
    /// Adds `node` next to `sibling`, directly underneath it.
    fn insert_below(&mut self, node: NodeId, sibling: NodeId);
    /// Removes `node` from its parent; no-op when detached.
    fn detach(&mut self, node: NodeId);
    fn set_frame(&mut self, node: NodeId, frame: Rect);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// Fast start, slow finish.
    EaseOut,
}

/// A frame animation of one node. The host must answer it with exactly one
/// [`AnimationCompleted`], built by [`AnimationRequest::completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    pub node: NodeId,
    pub from: Rect,
    pub to: Rect,
    pub duration_ms: u32,
    pub curve: Curve,
    pub displaced_slot: SlotIndex,
    /// Tags the slide this request belongs to; echoed back on completion.
    pub generation: u32,
}

impl AnimationRequest {
    pub fn completed(&self, finished: bool) -> AnimationCompleted {
        AnimationCompleted { displaced_slot: self.displaced_slot, generation: self.generation, finished }
    }
}

/// Delivered back into the core when an animation stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCompleted {
    /// Slot that slid away and must now be released.
    pub displaced_slot: SlotIndex,
    pub generation: u32,
    /// `false` when the host unscheduled the animation early.
    pub finished: bool,
}

pub trait Animator {
    fn start_animation(&mut self, request: AnimationRequest);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Time,
    Date,
    Day,
}

pub trait TextSink {
    fn set_text(&mut self, field: TextField, text: &str);
}

/// Everything the watch face needs from its host.
pub trait Host: ResourceService + LayerTree + Animator + TextSink {}

impl<T: ResourceService + LayerTree + Animator + TextSink> Host for T {}
