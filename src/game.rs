use crate::action::{Action, MenuAction, OptionsAction, QuizAction};
use crate::color::ColorName;
use crate::config::GameConfig;
use crate::input_state::InputState;
use crate::round::{AnswerResult, RoundPhase, RoundState};
use crate::screen::Screen;
use crate::settings::Options;
use crate::util::{Sign, step_index};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Things the presentation layer should make audible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Welcome,
    Click,
    Refused,
    Prompt(ColorName),
    Right,
    Wrong,
    RoundOver,
}

#[derive(Debug)]
pub struct ColorsGame {
    pub options: Options,
    pub screen: Screen,
    pub round: Option<RoundState>,
    pub input_state: InputState,
    pub target_questions: u32,
    /// square picked last, framed while its result is shown
    pub highlight: Option<usize>,
    pub quit: bool,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl ColorsGame {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config.options(), config.target_questions, StdRng::from_os_rng())
    }

    pub fn with_rng(options: Options, target_questions: u32, rng: StdRng) -> Self {
        Self {
            options,
            screen: Screen::Menu,
            round: None,
            input_state: InputState::default(),
            target_questions,
            highlight: None,
            quit: false,
            events: vec![GameEvent::Welcome],
            rng,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub fn act(&mut self, action: Action) {
        self.input_state.action = Some(action);
        self.update();
    }

    pub fn update(&mut self) {
        let Some(action) = self.input_state.action.take() else {
            return;
        };
        log::debug!("{:?} on {:?}", action, self.screen);

        match action {
            Action::Menu(MenuAction::FindColors | MenuAction::Options) => {
                self.events.push(GameEvent::Click);
                self.goto(Screen::Options);
            }
            Action::Options(a) => self.update_options(a),
            Action::Quiz(a) => self.update_quiz(a),
            Action::Back => {
                self.events.push(GameEvent::Click);
                match self.screen {
                    Screen::Menu => self.quit = true,
                    Screen::Options | Screen::Quiz => {
                        self.round = None;
                        self.goto(Screen::Menu);
                    }
                }
            }
            Action::Quit => self.quit = true,
        }
    }

    fn update_options(&mut self, action: OptionsAction) {
        if self.screen != Screen::Options {
            return;
        }
        let accepted = match action {
            OptionsAction::ChangeChoices(Sign::Positive) => self.options.increment_choices(),
            OptionsAction::ChangeChoices(Sign::Negative) => self.options.decrement_choices(),
            OptionsAction::ToggleColor(name) => self.options.toggle_color(name),
            OptionsAction::ForceColor(name) => self.options.set_forced_color(name),
            OptionsAction::Ok => return self.start_round_or_refuse(),
        };
        self.events.push(if accepted {
            GameEvent::Click
        } else {
            GameEvent::Refused
        });
    }

    fn start_round_or_refuse(&mut self) {
        if !self.start_round() {
            self.events.push(GameEvent::Refused);
        }
    }

    fn start_round(&mut self) -> bool {
        let Options { catalog, settings } = &self.options;
        match RoundState::start(self.target_questions, settings, catalog, &mut self.rng) {
            Ok(round) => {
                log::info!(
                    "round started: {} choices, forced {:?}",
                    settings.num_choices,
                    settings.forced_color
                );
                self.events.push(GameEvent::Click);
                self.events.push(GameEvent::Prompt(round.correct_color()));
                self.round = Some(round);
                self.highlight = None;
                self.goto(Screen::Quiz);
                true
            }
            Err(e) => {
                log::error!("could not start a round: {e}");
                false
            }
        }
    }

    fn update_quiz(&mut self, action: QuizAction) {
        let Screen::Quiz = self.screen else { return };
        let Some(round) = &mut self.round else { return };

        match action {
            QuizAction::Pick(index) => {
                let Some(&chosen) = round.squares().get(index) else {
                    return;
                };
                match round.submit_answer(chosen) {
                    AnswerResult::None => return,
                    AnswerResult::Right => self.events.push(GameEvent::Right),
                    AnswerResult::Wrong => self.events.push(GameEvent::Wrong),
                }
                self.highlight = Some(index);
                if round.is_over() {
                    log::info!("round over, score {}%", round.final_score());
                    self.events.push(GameEvent::RoundOver);
                    self.input_state.cursor = 0;
                }
            }
            QuizAction::Next => {
                let Options { catalog, settings } = &self.options;
                match round.advance(settings, catalog, &mut self.rng) {
                    Ok(true) => {
                        self.highlight = None;
                        self.events.push(GameEvent::Click);
                        self.events.push(GameEvent::Prompt(round.correct_color()));
                    }
                    Ok(false) => {}
                    Err(e) => {
                        log::error!("could not generate the next question: {e}");
                        self.events.push(GameEvent::Refused);
                    }
                }
            }
            QuizAction::NewGame => {
                if round.phase != RoundPhase::RoundOver {
                    return;
                }
                // kept until the next OK replaces it
                round.reset();
                self.events.push(GameEvent::Click);
                self.goto(Screen::Options);
            }
        }
    }

    fn goto(&mut self, screen: Screen) {
        self.screen = screen;
        self.input_state.cursor = 0;
    }

    /// Number of keyboard focus stops on the current screen.
    pub fn focus_len(&self) -> usize {
        match self.screen {
            Screen::Menu => 3,
            Screen::Options => self.options.catalog.len(),
            Screen::Quiz => match &self.round {
                Some(round) if round.is_over() => 2,
                Some(round) => round.squares().len(),
                None => 0,
            },
        }
    }

    pub fn move_cursor(&mut self, sign: Sign) {
        let len = self.focus_len();
        let cursor = &mut self.input_state.cursor;
        *cursor = step_index(*cursor, sign, len);
    }
}
