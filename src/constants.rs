use crate::selector::ImageId;

pub const SCREEN_WIDTH: u16 = 144;            // Width of the watch screen
pub const SCREEN_HEIGHT: u16 = 168;           // Height of the watch screen
pub const TEXT_BAND_HEIGHT: u16 = 42;         // Height of the time/date strip under the photo

pub const SLIDE_DURATION_MS: u32 = 400;       // Duration of the slide-out animation (milliseconds)

pub const FPS: u32 = 30;                      // Frames per second of the desktop host

// Set the image count and the image table together
pub const IMAGE_COUNT: usize = 7;
pub const IMAGE_TABLE: [ImageId; IMAGE_COUNT] = [
    ImageId(1),
    ImageId(2),
    ImageId(3),
    ImageId(4),
    ImageId(5),
    ImageId(6),
    ImageId(7),
];
