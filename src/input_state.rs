use crate::action::Action;

#[derive(Default, Debug)]
pub struct InputState {
    /// focused item of the current screen, for keyboard play
    pub cursor: usize,
    pub action: Option<Action>,
}
