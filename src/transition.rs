use log::{debug, info, warn};

use crate::constants::SLIDE_DURATION_MS;
use crate::error::WatchError;
use crate::geometry::Size;
use crate::host::{AnimationCompleted, AnimationRequest, Curve, Host};
use crate::selector::ImageId;
use crate::slot::{SlotIndex, SlotManager};
use crate::state::TransitionState;

/// What a request or a completion did to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The requested image is already the settled one.
    Unchanged,
    /// First paint: the image was placed directly, without animation.
    Placed(ImageId),
    /// A slide started; `from` moves off screen revealing `to`.
    Started { from: SlotIndex, to: SlotIndex, image: ImageId },
    /// The request matches the image already sliding in.
    AlreadyStaged,
    /// A slide is in flight; the image will be shown once it completes.
    Queued(ImageId),
    /// The in-flight slide finished and `image` is now active.
    Settled(ImageId),
}

/// Sole owner of the two image slots. Runs at most one slide at a time.
#[derive(Debug)]
pub struct TransitionController {
    slots: SlotManager,
    state: TransitionState,
    active: SlotIndex,
    current: Option<ImageId>,
    staged: Option<ImageId>,
    pending: Option<ImageId>,
    // bumped per slide and per teardown; stale completions carry an older value
    generation: u32,
    slide_distance: i16,
}

impl TransitionController {
    /// `region` is the image area; slides move one full `screen_width` left.
    pub fn new(region: Size, screen_width: u16) -> Self {
        Self {
            slots: SlotManager::new(region),
            state: TransitionState::Idle,
            active: SlotIndex::First,
            current: None,
            staged: None,
            pending: None,
            generation: 0,
            slide_distance: screen_width as i16,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn active_slot(&self) -> SlotIndex {
        self.active
    }

    /// Image of the last settled slot; never the one mid-slide.
    pub fn current_image(&self) -> Option<ImageId> {
        self.current
    }

    pub fn staged_image(&self) -> Option<ImageId> {
        self.staged
    }

    pub fn pending_image(&self) -> Option<ImageId> {
        self.pending
    }

    pub fn slots(&self) -> &SlotManager {
        &self.slots
    }

    pub fn request<H: Host>(&mut self, host: &mut H, desired: ImageId) -> Result<TransitionOutcome, WatchError> {
        if self.state.is_animating() {
            if self.staged == Some(desired) {
                self.pending = None;
                return Ok(TransitionOutcome::AlreadyStaged);
            }
            debug!("Slide in flight, queueing {}", desired);
            self.pending = Some(desired);
            return Ok(TransitionOutcome::Queued(desired));
        }

        match self.current {
            Some(current) if current == desired => Ok(TransitionOutcome::Unchanged),
            Some(_) => self.begin_slide(host, desired),
            None => self.place(host, desired),
        }
    }

    fn place<H: Host>(&mut self, host: &mut H, image: ImageId) -> Result<TransitionOutcome, WatchError> {
        self.slots.load(host, self.active, image)?;
        self.slots.attach(host, self.active);
        self.current = Some(image);
        info!("Placed {} in slot {:?}", image, self.active);
        Ok(TransitionOutcome::Placed(image))
    }

    fn begin_slide<H: Host>(&mut self, host: &mut H, image: ImageId) -> Result<TransitionOutcome, WatchError> {
        let from = self.active;
        let to = from.other();

        // nothing has changed on screen if this fails
        self.slots.load(host, to, image)?;
        self.slots.insert_below(host, to, from);

        self.generation = self.generation.wrapping_add(1);
        let start = self.slots.slot(from).frame();
        let request = AnimationRequest {
            node: from.node(),
            from: start,
            to: start.shifted_x(-self.slide_distance),
            duration_ms: SLIDE_DURATION_MS,
            curve: Curve::EaseOut,
            displaced_slot: from,
            generation: self.generation,
        };
        host.start_animation(request);

        self.state = TransitionState::Animating { from, to, generation: self.generation };
        self.staged = Some(image);
        debug!("Sliding {:?} out to reveal {} in {:?}", from, image, to);
        Ok(TransitionOutcome::Started { from, to, image })
    }

    /// Settles the slide named by `event`, then starts any queued request.
    ///
    /// If the queued image fails to load, the settled image stays active and
    /// the load error is returned.
    pub fn complete<H: Host>(&mut self, host: &mut H, event: AnimationCompleted) -> Result<TransitionOutcome, WatchError> {
        let (from, to) = match self.state {
            TransitionState::Animating { from, to, generation }
                if from == event.displaced_slot && generation == event.generation =>
            {
                (from, to)
            }
            state => {
                warn!(
                    "Ignoring completion for slot {:?} (slide {}) while {:?}",
                    event.displaced_slot, event.generation, state
                );
                return Ok(TransitionOutcome::Unchanged);
            }
        };
        if !event.finished {
            debug!("Slide of {:?} was cut short, settling anyway", from);
        }

        self.slots.release(host, from);
        self.active = to;
        self.current = self.staged.take();
        self.state = TransitionState::Idle;

        let Some(settled) = self.current else {
            return Ok(TransitionOutcome::Unchanged);
        };
        info!("Settled {} in slot {:?}", settled, to);

        match self.pending.take() {
            Some(next) => match self.request(host, next) {
                Ok(TransitionOutcome::Unchanged) => Ok(TransitionOutcome::Settled(settled)),
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    warn!("Queued {} failed, keeping {}: {}", next, settled, e);
                    Err(e)
                }
            },
            None => Ok(TransitionOutcome::Settled(settled)),
        }
    }

    /// Abrupt teardown: frees both slots, even mid-slide, and returns to the
    /// empty state. Completions for slides started before this are ignored.
    pub fn shutdown<H: Host>(&mut self, host: &mut H) {
        if let TransitionState::Animating { from, to, .. } = self.state {
            warn!("Tearing down while {:?} slides over {:?}", from, to);
        }
        self.slots.release_all(host);
        self.state = TransitionState::Idle;
        self.active = SlotIndex::First;
        self.current = None;
        self.staged = None;
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);
    }
}
