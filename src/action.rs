use crate::color::ColorName;
use crate::util::Sign;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Menu(MenuAction),
    Options(OptionsAction),
    Quiz(QuizAction),
    Back,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    FindColors,
    Options,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionsAction {
    ChangeChoices(Sign),
    ToggleColor(ColorName),
    ForceColor(ColorName),
    Ok,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuizAction {
    /// index of the square, left to right
    Pick(usize),
    Next,
    NewGame,
}
