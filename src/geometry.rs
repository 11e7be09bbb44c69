use crate::constants::TEXT_BAND_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: u16,
    pub h: u16,
}

impl Size {
    pub const fn new(w: u16, h: u16) -> Self {
        Self { w, h }
    }

    /// Pixel dimensions as reported by a decoder; `None` when either side
    /// is negative or does not fit in a `u16`.
    pub fn from_pixels(w: i32, h: i32) -> Option<Self> {
        Some(Self::new(u16::try_from(w).ok()?, u16::try_from(h).ok()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i16, y: i16, w: u16, h: u16) -> Self {
        Self { origin: Point::new(x, y), size: Size::new(w, h) }
    }

    /// Same rectangle moved by `dx` horizontally.
    pub fn shifted_x(self, dx: i16) -> Self {
        Self { origin: Point::new(self.origin.x.saturating_add(dx), self.origin.y), size: self.size }
    }

    /// Frame of an image of `bitmap` size placed inside `region`: pinned to the
    /// top, centred horizontally when narrower, height clamped when taller.
    /// Width is never clamped.
    pub fn placement(bitmap: Size, region: Size) -> Self {
        let x = if bitmap.w < region.w { ((region.w - bitmap.w) / 2) as i16 } else { 0 };
        let h = bitmap.h.min(region.h);
        Rect::new(x, 0, bitmap.w, h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
    Right,
}

/// Rectangles of every element of the watch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    pub screen: Size,
    pub image_region: Rect,
    pub text_band: Rect,
    pub time_field: Rect,
    pub date_field: Rect,
    pub day_field: Rect,
}

impl FaceLayout {
    pub fn for_screen(screen: Size) -> Self {
        let band = TEXT_BAND_HEIGHT.min(screen.h);
        let image_h = screen.h - band;
        let band_y = image_h as i16;

        // time takes ~65% of the width, date and day stack on the right
        let time_w = (screen.w as u32 * 65 / 100) as u16;
        let side_w = screen.w - time_w;
        let side_h = 23;
        let right_pad = 2;
        let side_x = screen.w as i16 - side_w as i16 - right_pad;

        Self {
            screen,
            image_region: Rect::new(0, 0, screen.w, image_h),
            text_band: Rect::new(0, band_y, screen.w, band),
            time_field: Rect::new(0, band_y + 2, time_w, band),
            date_field: Rect::new(side_x, screen.h as i16 - side_h as i16, side_w, side_h),
            day_field: Rect::new(side_x, band_y, side_w, side_h),
        }
    }
}
