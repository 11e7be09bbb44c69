use crate::slot::SlotIndex;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TransitionState {
    Idle,                                                          // Active slot settled, nothing moving
    Animating { from: SlotIndex, to: SlotIndex, generation: u32 }, // `from` is sliding away, revealing `to`
}

impl TransitionState {
    pub fn is_animating(&self) -> bool {
        matches!(self, TransitionState::Animating { .. })
    }
}
