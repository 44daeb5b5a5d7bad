use crate::color::{Catalog, ColorName};
use crate::question::{Question, generate_question};
use crate::settings::GameSettings;
use color_eyre::eyre::Result;
use rand::Rng;

pub const TARGET_QUESTIONS: u32 = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RoundPhase {
    #[default]
    AwaitingAnswer,
    ShowingFeedback,
    RoundOver,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AnswerResult {
    #[default]
    None,
    Right,
    Wrong,
}

/// One round of `target_questions` questions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub question_index: u32,
    pub correct_count: u32,
    pub target_questions: u32,
    pub question: Question,
    pub awaiting_next: bool,
    pub last_result: AnswerResult,
    pub phase: RoundPhase,
    // a wrong pick on the current question forfeits its point
    wrong_this_question: bool,
}

impl RoundState {
    pub fn new(target_questions: u32, question: Question) -> Self {
        Self {
            question_index: 0,
            correct_count: 0,
            target_questions,
            question,
            awaiting_next: false,
            last_result: AnswerResult::None,
            phase: RoundPhase::AwaitingAnswer,
            wrong_this_question: false,
        }
    }

    pub fn start<R: Rng + ?Sized>(
        target_questions: u32,
        settings: &GameSettings,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<Self> {
        let question = generate_question(settings, catalog, rng)?;
        Ok(Self::new(target_questions, question))
    }

    pub fn correct_color(&self) -> ColorName {
        self.question.correct
    }

    pub fn squares(&self) -> &[ColorName] {
        &self.question.squares
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    /// Checks `chosen` against the current question. Picks outside of
    /// `AwaitingAnswer` are ignored and yield `AnswerResult::None`.
    pub fn submit_answer(&mut self, chosen: ColorName) -> AnswerResult {
        if self.phase != RoundPhase::AwaitingAnswer {
            return AnswerResult::None;
        }

        if chosen != self.question.correct {
            self.last_result = AnswerResult::Wrong;
            self.wrong_this_question = true;
            self.awaiting_next = false;
            return AnswerResult::Wrong;
        }

        self.last_result = AnswerResult::Right;
        self.question_index += 1;
        if !self.wrong_this_question {
            self.correct_count += 1;
        }

        if self.question_index >= self.target_questions {
            self.phase = RoundPhase::RoundOver;
            self.awaiting_next = false;
        } else {
            self.phase = RoundPhase::ShowingFeedback;
            self.awaiting_next = true;
        }
        AnswerResult::Right
    }

    /// Moves on to a fresh question after a right answer. Does nothing unless
    /// the round is waiting for it. On error the state is left untouched.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        settings: &GameSettings,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<bool> {
        if !self.awaiting_next {
            return Ok(false);
        }
        self.question = generate_question(settings, catalog, rng)?;
        self.last_result = AnswerResult::None;
        self.wrong_this_question = false;
        self.awaiting_next = false;
        self.phase = RoundPhase::AwaitingAnswer;
        Ok(true)
    }

    /// Percentage of questions answered right on the first try.
    pub fn final_score(&self) -> u32 {
        if self.target_questions == 0 {
            return 0;
        }
        (f64::from(self.correct_count) / f64::from(self.target_questions) * 100.0).round() as u32
    }

    pub fn reset(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.awaiting_next = false;
        self.last_result = AnswerResult::None;
        self.wrong_this_question = false;
        self.phase = RoundPhase::AwaitingAnswer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorName::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (GameSettings, Catalog, StdRng) {
        let settings = GameSettings {
            num_choices: 3,
            forced_color: None,
        };
        let catalog = Catalog::with_enabled(&[Red, Green, Blue, Yellow]);
        (settings, catalog, StdRng::seed_from_u64(11))
    }

    fn wrong_pick(round: &RoundState) -> ColorName {
        *round
            .squares()
            .iter()
            .find(|&&c| c != round.correct_color())
            .unwrap()
    }

    #[test]
    fn starts_awaiting_answer() {
        let (settings, catalog, mut rng) = setup();
        let round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        assert_eq!(round.phase, RoundPhase::AwaitingAnswer);
        assert_eq!(round.last_result, AnswerResult::None);
        assert!(!round.awaiting_next);
        assert_eq!(round.squares().len(), 3);
    }

    #[test]
    fn wrong_then_right_advances_without_scoring() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();

        let wrong = wrong_pick(&round);
        assert_eq!(round.submit_answer(wrong), AnswerResult::Wrong);
        assert_eq!(round.phase, RoundPhase::AwaitingAnswer);
        assert!(!round.awaiting_next);
        assert_eq!(round.question_index, 0);

        assert_eq!(round.submit_answer(round.correct_color()), AnswerResult::Right);
        assert_eq!(round.question_index, 1);
        assert_eq!(round.correct_count, 0);
        assert_eq!(round.phase, RoundPhase::ShowingFeedback);
        assert!(round.awaiting_next);
    }

    #[test]
    fn answers_during_feedback_are_ignored() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        round.submit_answer(round.correct_color());
        assert_eq!(round.submit_answer(round.correct_color()), AnswerResult::None);
        assert_eq!(round.question_index, 1);
        assert_eq!(round.correct_count, 1);
    }

    #[test]
    fn advance_needs_a_right_answer_first() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        let wrong = wrong_pick(&round);
        round.submit_answer(wrong);
        assert!(!round.advance(&settings, &catalog, &mut rng).unwrap());
        assert_eq!(round.last_result, AnswerResult::Wrong);

        round.submit_answer(round.correct_color());
        assert!(round.advance(&settings, &catalog, &mut rng).unwrap());
        assert_eq!(round.phase, RoundPhase::AwaitingAnswer);
        assert_eq!(round.last_result, AnswerResult::None);

        // the wrong pick on the previous question does not carry over
        round.submit_answer(round.correct_color());
        assert_eq!(round.correct_count, 1);
    }

    #[test]
    fn perfect_round_scores_100() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        for i in 0..TARGET_QUESTIONS {
            assert_eq!(round.submit_answer(round.correct_color()), AnswerResult::Right);
            if i + 1 < TARGET_QUESTIONS {
                assert!(round.advance(&settings, &catalog, &mut rng).unwrap());
            }
        }
        assert!(round.is_over());
        assert!(!round.awaiting_next);
        assert_eq!(round.final_score(), 100);
        assert_eq!(round.submit_answer(round.correct_color()), AnswerResult::None);
    }

    #[test]
    fn six_first_try_four_retried_scores_60() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        for i in 0..TARGET_QUESTIONS {
            if i >= 6 {
                let wrong = wrong_pick(&round);
                round.submit_answer(wrong);
            }
            round.submit_answer(round.correct_color());
            round.advance(&settings, &catalog, &mut rng).unwrap();
        }
        assert!(round.is_over());
        assert_eq!(round.question_index, 10);
        assert_eq!(round.correct_count, 6);
        assert_eq!(round.final_score(), 60);
    }

    #[test]
    fn failed_advance_keeps_the_round() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        round.submit_answer(round.correct_color());
        let before = round.clone();

        let shrunk = Catalog::with_enabled(&[Red, Green]);
        assert!(round.advance(&settings, &shrunk, &mut rng).is_err());
        assert_eq!(round, before);
        assert!(round.awaiting_next);
        assert_eq!(round.phase, RoundPhase::ShowingFeedback);

        assert!(round.advance(&settings, &catalog, &mut rng).unwrap());
        assert_eq!(round.phase, RoundPhase::AwaitingAnswer);
    }

    #[test]
    fn reset_gives_zero_score() {
        let (settings, catalog, mut rng) = setup();
        let mut round = RoundState::start(TARGET_QUESTIONS, &settings, &catalog, &mut rng).unwrap();
        round.submit_answer(round.correct_color());
        round.reset();
        assert_eq!(round.question_index, 0);
        assert_eq!(round.correct_count, 0);
        assert_eq!(round.phase, RoundPhase::AwaitingAnswer);
        assert_eq!(round.final_score(), 0);

        let empty = RoundState::new(0, round.question.clone());
        assert_eq!(empty.final_score(), 0);
    }
}
