use std::fmt;

use crate::error::WatchError;

/// Opaque identifier of an image resource, resolved by the host's resource service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense, ordered table of the images the face cycles through.
#[derive(Debug, Clone, Copy)]
pub struct ImageTable {
    images: &'static [ImageId],
}

impl ImageTable {
    pub fn new(images: &'static [ImageId]) -> Result<Self, WatchError> {
        if images.is_empty() {
            return Err(WatchError::InvalidConfiguration("image table is empty"));
        }
        for (i, id) in images.iter().enumerate() {
            if images[..i].contains(id) {
                return Err(WatchError::InvalidConfiguration("image table repeats an identifier"));
            }
        }
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn get(&self, index: usize) -> Option<ImageId> {
        self.images.get(index).copied()
    }

    /// Index into the table for a wall-clock time: `(hour * 100 + minute) mod N`.
    pub fn index_for(&self, hour: u8, minute: u8) -> usize {
        (hour as usize * 100 + minute as usize) % self.images.len()
    }

    pub fn select_image(&self, hour: u8, minute: u8) -> ImageId {
        self.images[self.index_for(hour, minute)]
    }
}

pub fn select_image(table: &ImageTable, hour: u8, minute: u8) -> ImageId {
    table.select_image(hour, minute)
}
