use log::{debug, warn};

use crate::error::WatchError;
use crate::geometry::{Rect, Size};
use crate::host::{Bitmap, LayerTree, NodeId, ResourceService};
use crate::selector::ImageId;

/// One of the two entries of the image double buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotIndex {
    First,
    Second,
}

impl SlotIndex {
    pub fn index(self) -> usize {
        match self {
            SlotIndex::First => 0,
            SlotIndex::Second => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            SlotIndex::First => SlotIndex::Second,
            SlotIndex::Second => SlotIndex::First,
        }
    }

    pub fn node(self) -> NodeId {
        NodeId::Slot(self)
    }
}

#[derive(Debug, Default)]
pub struct ImageSlot {
    bitmap: Option<Bitmap>,
    frame: Rect,
    attached: bool,
}

impl ImageSlot {
    pub fn resource_id(&self) -> Option<ImageId> {
        self.bitmap.as_ref().map(|b| b.image)
    }

    pub fn is_loaded(&self) -> bool {
        self.bitmap.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Settled placement inside the image region.
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

/// Owns both slots and every resource they hold. Slots are always addressed
/// by [`SlotIndex`].
#[derive(Debug)]
pub struct SlotManager {
    slots: [ImageSlot; 2],
    region: Size,
}

impl SlotManager {
    pub fn new(region: Size) -> Self {
        Self { slots: Default::default(), region }
    }

    pub fn slot(&self, index: SlotIndex) -> &ImageSlot {
        &self.slots[index.index()]
    }

    /// Replaces whatever `index` holds with `image` and places it. On failure
    /// the slot is left empty.
    pub fn load<H>(&mut self, host: &mut H, index: SlotIndex, image: ImageId) -> Result<(), WatchError>
    where
        H: ResourceService + LayerTree,
    {
        self.release(host, index);

        let bitmap = host.materialize(image).inspect_err(|e| {
            warn!("Could not load {} into slot {:?}: {}", image, index, e);
        })?;

        let frame = Rect::placement(bitmap.size, self.region);
        host.bind(index.node(), Some(&bitmap));
        host.set_frame(index.node(), frame);
        debug!("Loaded {} into slot {:?} at {:?}", image, index, frame);

        let slot = &mut self.slots[index.index()];
        slot.bitmap = Some(bitmap);
        slot.frame = frame;
        Ok(())
    }

    /// Puts the slot on top of the image root.
    pub fn attach<H: LayerTree>(&mut self, host: &mut H, index: SlotIndex) {
        host.attach(index.node(), NodeId::ImageRoot);
        self.slots[index.index()].attached = true;
    }

    /// Puts the slot directly underneath `sibling`.
    pub fn insert_below<H: LayerTree>(&mut self, host: &mut H, index: SlotIndex, sibling: SlotIndex) {
        host.insert_below(index.node(), sibling.node());
        self.slots[index.index()].attached = true;
    }

    /// Detaches the slot and frees its resource. Empty slots are left alone.
    pub fn release<H>(&mut self, host: &mut H, index: SlotIndex)
    where
        H: ResourceService + LayerTree,
    {
        let slot = &mut self.slots[index.index()];
        if slot.attached {
            host.detach(index.node());
            slot.attached = false;
        }
        if let Some(bitmap) = slot.bitmap.take() {
            host.bind(index.node(), None);
            debug!("Releasing {} from slot {:?}", bitmap.image, index);
            host.free(bitmap);
        }
        slot.frame = Rect::default();
    }

    pub fn release_all<H>(&mut self, host: &mut H)
    where
        H: ResourceService + LayerTree,
    {
        self.release(host, SlotIndex::First);
        self.release(host, SlotIndex::Second);
    }
}
