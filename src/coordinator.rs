use log::debug;

use crate::constants::{IMAGE_TABLE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::WatchError;
use crate::geometry::{FaceLayout, Size};
use crate::host::{AnimationCompleted, Host, TextField};
use crate::selector::{ImageId, ImageTable};
use crate::slot::SlotIndex;
use crate::text::TextState;
use crate::time::{ClockStyle, WatchTime};
use crate::transition::{TransitionController, TransitionOutcome};

/// Everything the face remembers between events. Created empty, mutated only
/// by [`DisplayCoordinator`].
#[derive(Debug)]
pub struct DisplayState {
    transition: TransitionController,
    text: TextState,
}

impl DisplayState {
    pub fn new(layout: &FaceLayout) -> Self {
        Self {
            transition: TransitionController::new(layout.image_region.size, layout.screen.w),
            text: TextState::new(),
        }
    }

    pub fn current_image_id(&self) -> Option<ImageId> {
        self.transition.current_image()
    }

    pub fn active_slot(&self) -> SlotIndex {
        self.transition.active_slot()
    }

    pub fn transition_in_progress(&self) -> bool {
        self.transition.state().is_animating()
    }

    pub fn last_shown_day_of_year(&self) -> Option<u16> {
        self.text.last_shown_day_of_year()
    }

    pub fn current_time_text(&self) -> &str {
        self.text.time()
    }

    pub fn text(&self) -> &TextState {
        &self.text
    }

    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }
}

/// Result of one init or tick.
#[derive(Debug)]
pub struct TickReport {
    /// A failed load leaves the previous image on screen.
    pub image: Result<TransitionOutcome, WatchError>,
    pub date_redrawn: bool,
}

/// Drives the face: picks the image for the time, hands it to the transition
/// controller and pushes whichever strings changed.
#[derive(Debug, Clone)]
pub struct DisplayCoordinator {
    table: ImageTable,
    style: ClockStyle,
    layout: FaceLayout,
}

impl DisplayCoordinator {
    pub fn new(images: &'static [ImageId], style: ClockStyle, screen: Size) -> Result<Self, WatchError> {
        Ok(Self {
            table: ImageTable::new(images)?,
            style,
            layout: FaceLayout::for_screen(screen),
        })
    }

    /// Coordinator for the built-in image table and screen.
    pub fn with_defaults(style: ClockStyle) -> Result<Self, WatchError> {
        Self::new(&IMAGE_TABLE, style, Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    pub fn table(&self) -> &ImageTable {
        &self.table
    }

    pub fn style(&self) -> ClockStyle {
        self.style
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    pub fn new_state(&self) -> DisplayState {
        DisplayState::new(&self.layout)
    }

    /// Resets `state`, places the first image without animation and renders
    /// all three strings.
    pub fn on_init<H: Host>(&self, state: &mut DisplayState, host: &mut H, now: &WatchTime) -> Result<TickReport, WatchError> {
        // the controller is reset in place so it keeps its slide count
        state.transition.shutdown(host);
        state.text = TextState::new();

        let image = self.update_image(state, host, now);
        state.text.refresh_date(now)?;
        self.push_date(state, host);
        self.push_time(state, host, now)?;

        Ok(TickReport { image, date_redrawn: true })
    }

    pub fn on_tick<H: Host>(&self, state: &mut DisplayState, host: &mut H, now: &WatchTime) -> Result<TickReport, WatchError> {
        let image = self.update_image(state, host, now);

        let date_redrawn = state.text.refresh_date(now)?;
        if date_redrawn {
            self.push_date(state, host);
        } else {
            debug!("Day {} already shown", now.day_of_year);
        }
        self.push_time(state, host, now)?;

        Ok(TickReport { image, date_redrawn })
    }

    pub fn on_animation_completed<H: Host>(
        &self,
        state: &mut DisplayState,
        host: &mut H,
        event: AnimationCompleted,
    ) -> Result<TransitionOutcome, WatchError> {
        state.transition.complete(host, event)
    }

    pub fn on_shutdown<H: Host>(&self, state: &mut DisplayState, host: &mut H) {
        state.transition.shutdown(host);
    }

    fn update_image<H: Host>(&self, state: &mut DisplayState, host: &mut H, now: &WatchTime) -> Result<TransitionOutcome, WatchError> {
        let desired = self.table.select_image(now.hour, now.minute);
        state.transition.request(host, desired)
    }

    fn push_date<H: Host>(&self, state: &DisplayState, host: &mut H) {
        host.set_text(TextField::Date, state.text.date());
        host.set_text(TextField::Day, state.text.day());
    }

    fn push_time<H: Host>(&self, state: &mut DisplayState, host: &mut H, now: &WatchTime) -> Result<(), WatchError> {
        let text = state.text.refresh_time(now, self.style)?;
        host.set_text(TextField::Time, text);
        Ok(())
    }
}
