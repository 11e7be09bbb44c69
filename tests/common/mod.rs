#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use photo_watch::WatchError;
use photo_watch::geometry::{Rect, Size};
use photo_watch::host::{
    AnimationCompleted, AnimationRequest, Animator, Bitmap, LayerTree, NodeId, ResourceService, TextField, TextSink,
};
use photo_watch::selector::ImageId;

/// Every call the core made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Materialize(ImageId),
    Free(ImageId),
    Bind(NodeId, Option<ImageId>),
    Attach(NodeId, NodeId),
    InsertBelow(NodeId, NodeId),
    Detach(NodeId),
    SetFrame(NodeId, Rect),
    Animate(AnimationRequest),
    SetText(TextField, String),
}

/// Host double: records calls, keeps a simple layer stack, holds animations
/// until the test finishes them.
#[derive(Debug, Default)]
pub struct MockHost {
    pub calls: Vec<Call>,
    pub sizes: HashMap<ImageId, Size>,
    pub failing: HashSet<ImageId>,
    pub live: HashMap<u32, ImageId>,
    pub stack: Vec<NodeId>,
    pub animations: Vec<AnimationRequest>,
    pub texts: HashMap<TextField, String>,
    next_handle: u32,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, image: ImageId) {
        self.failing.insert(image);
    }

    pub fn with_size(mut self, image: ImageId, size: Size) -> Self {
        self.sizes.insert(image, size);
        self
    }

    /// Finishes the oldest running animation and returns its completion event.
    pub fn finish_animation(&mut self) -> AnimationCompleted {
        let request = self.animations.remove(0);
        request.completed(true)
    }

    pub fn live_images(&self) -> Vec<ImageId> {
        let mut images: Vec<ImageId> = self.live.values().copied().collect();
        images.sort();
        images
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn text_pushes(&self, field: TextField) -> usize {
        self.count(|c| matches!(c, Call::SetText(f, _) if *f == field))
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ResourceService for MockHost {
    fn materialize(&mut self, image: ImageId) -> Result<Bitmap, WatchError> {
        self.calls.push(Call::Materialize(image));
        if self.failing.contains(&image) {
            return Err(WatchError::ResourceUnavailable { image });
        }
        self.next_handle += 1;
        let handle = self.next_handle;
        self.live.insert(handle, image);
        let size = self.sizes.get(&image).copied().unwrap_or(Size::new(144, 126));
        Ok(Bitmap { image, handle, size })
    }

    fn free(&mut self, bitmap: Bitmap) {
        self.calls.push(Call::Free(bitmap.image));
        assert!(self.live.remove(&bitmap.handle).is_some(), "double free of {:?}", bitmap);
    }
}

impl LayerTree for MockHost {
    fn bind(&mut self, node: NodeId, bitmap: Option<&Bitmap>) {
        self.calls.push(Call::Bind(node, bitmap.map(|b| b.image)));
    }

    fn attach(&mut self, node: NodeId, parent: NodeId) {
        self.calls.push(Call::Attach(node, parent));
        self.stack.retain(|n| *n != node);
        self.stack.push(node);
    }

    fn insert_below(&mut self, node: NodeId, sibling: NodeId) {
        self.calls.push(Call::InsertBelow(node, sibling));
        self.stack.retain(|n| *n != node);
        let at = self.stack.iter().position(|n| *n == sibling).expect("sibling is attached");
        self.stack.insert(at, node);
    }

    fn detach(&mut self, node: NodeId) {
        self.calls.push(Call::Detach(node));
        self.stack.retain(|n| *n != node);
    }

    fn set_frame(&mut self, node: NodeId, frame: Rect) {
        self.calls.push(Call::SetFrame(node, frame));
    }
}

impl Animator for MockHost {
    fn start_animation(&mut self, request: AnimationRequest) {
        self.calls.push(Call::Animate(request));
        self.animations.push(request);
    }
}

impl TextSink for MockHost {
    fn set_text(&mut self, field: TextField, text: &str) {
        self.calls.push(Call::SetText(field, text.to_string()));
        self.texts.insert(field, text.to_string());
    }
}
