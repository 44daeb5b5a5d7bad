use crate::action::{Action, MenuAction, OptionsAction, QuizAction};
use crate::args::ColorsArgs;
use crate::audio::AudioCues;
use crate::color::ColorName;
use crate::config::load_config;
use crate::game::ColorsGame;
use crate::round::AnswerResult;
use crate::screen::Screen;
use crate::settings::Options;
use crate::util::Sign::{Negative, Positive};
use crate::util::{Sign, centered_rect, hit, inflate};
use crate::widgets::{Button, TextBox};
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

const DARK_GRAY: Color = Color::Rgb(169, 169, 169);
const DARK_BLUE: Color = Color::Rgb(0, 0, 139);
const LIGHT_YELLOW: Color = Color::Rgb(255, 255, 200);
const GOLD: Color = Color::Rgb(255, 215, 0);
const BROWN: Color = Color::Rgb(165, 42, 42);
const ROUND_OVER_GRAY: Color = Color::Rgb(128, 128, 128);

const MENU: [(&str, Color, Action); 3] = [
    (
        "Find Colors",
        Button::DARK_GREEN,
        Action::Menu(MenuAction::FindColors),
    ),
    ("Options", Button::DARK_GREEN, Action::Menu(MenuAction::Options)),
    ("Quit", Button::DARK_RED, Action::Quit),
];

const ROUND_OVER: [(&str, Color, Action); 2] = [
    ("New Game", Button::DARK_GREEN, Action::Quiz(QuizAction::NewGame)),
    ("Exit Game", Button::DARK_RED, Action::Quit),
];

pub fn main(args: ColorsArgs) -> Result<()> {
    color_eyre::install()?;
    let config = args.apply(load_config(&args.config));
    let game = ColorsGame::new(&config);
    let cues = AudioCues::new(&config, args.mute);

    let terminal = ratatui::init();
    let result = App::new(game, cues).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    game: ColorsGame,
    cues: AudioCues,
    /// clickable areas of the last frame, topmost last
    hits: Vec<(Rect, Action)>,
}

impl App {
    pub fn new(game: ColorsGame, cues: AudioCues) -> Self {
        Self {
            running: false,
            game,
            cues,
            hits: Vec::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        std::io::stdout().execute(event::EnableMouseCapture)?;

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            // sounds go after the draw so they match what is on screen
            for cue in self.game.drain_events() {
                self.cues.handle(cue);
            }
            if event::poll(FRAME)? {
                self.handle_crossterm_events()?;
            }
            self.game.update();
            if self.game.quit {
                self.quit();
            }
        }

        std::io::stdout().execute(event::DisableMouseCapture)?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.hits.clear();
        let area = frame.area();
        frame.render_widget(Block::new().style(Style::new().bg(DARK_GRAY)), area);

        match self.game.screen {
            Screen::Menu => self.render_menu(frame, area),
            Screen::Options => self.render_options(frame, area),
            Screen::Quiz => {
                let over = self.game.round.as_ref().map(|r| (r.is_over(), r.final_score()));
                match over {
                    Some((true, score)) => self.render_round_over(frame, area, score),
                    Some((false, _)) => self.render_quiz(frame, area),
                    None => {}
                }
            }
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        const TITLE: &str = "The Learning Colors Game";
        let title_rect = centered_rect(area, TITLE.len() as u16 + 4, 3, area.y + area.height / 8);
        frame.render_widget(
            TextBox::new(
                vec![Line::from(TITLE).bold().fg(DARK_BLUE).centered()],
                LIGHT_YELLOW,
            ),
            title_rect,
        );

        let (width, height, spacing) = (30, 3, 1);
        let total = MENU.len() as u16 * (height + spacing) - spacing;
        let start_y = area.y + (area.height / 2).saturating_sub(total / 2);
        for (i, (label, color, action)) in MENU.into_iter().enumerate() {
            let rect = centered_rect(area, width, height, start_y + i as u16 * (height + spacing));
            let button = Button::new(rect, label)
                .color(color)
                .focused(self.game.input_state.cursor == i);
            add_button(frame, &mut self.hits, &button, action);
        }

        hint(frame, area, "Hint: Tap or click on a button to start.");
    }

    fn render_options(&mut self, frame: &mut Frame, area: Rect) {
        let Options { catalog, settings } = &self.game.options;
        let cursor = self.game.input_state.cursor;
        let mid = area.x + area.width / 2;

        heading(frame, area, "Options", area.y + 1, Color::Black);
        back_button(frame, &mut self.hits, area);

        let row = area.y + area.height / 5;
        heading(frame, area, "Number of choices:", row.saturating_sub(2), Color::White);
        let minus = Button::new(Rect::new(mid.saturating_sub(8), row, 5, 3).intersection(area), "-")
            .color(Button::DARK_RED);
        let plus =
            Button::new(Rect::new(mid + 4, row, 5, 3).intersection(area), "+").color(Button::DARK_RED);
        add_button(
            frame,
            &mut self.hits,
            &minus,
            Action::Options(OptionsAction::ChangeChoices(Negative)),
        );
        add_button(
            frame,
            &mut self.hits,
            &plus,
            Action::Options(OptionsAction::ChangeChoices(Positive)),
        );
        frame.render_widget(
            Paragraph::new(Line::from(settings.num_choices.to_string()).bold().fg(Button::DARK_RED))
                .centered(),
            Rect::new(mid.saturating_sub(2), row + 1, 5, 1).intersection(area),
        );

        let enable_row = area.y + area.height * 2 / 5;
        let force_row = area.y + area.height * 3 / 5;
        heading(frame, area, "Available choices:", enable_row.saturating_sub(2), Color::White);
        heading(frame, area, "Force choice:", force_row.saturating_sub(2), Color::White);

        const STEP: u16 = 8;
        let start_x = mid.saturating_sub(STEP * catalog.len() as u16 / 2);
        for (i, option) in catalog.iter().enumerate() {
            let x = start_x + i as u16 * STEP;
            let color = option.name.color();
            let focused = i == cursor;

            let enable = Rect::new(x, enable_row, 6, 3).intersection(area);
            checkbox(frame, enable, color, option.enabled, focused);
            self.hits.push((
                enable,
                Action::Options(OptionsAction::ToggleColor(option.name)),
            ));

            let force = Rect::new(x, force_row, 6, 3).intersection(area);
            checkbox(frame, force, color, settings.forced_color == Some(option.name), focused);
            self.hits.push((
                force,
                Action::Options(OptionsAction::ForceColor(option.name)),
            ));

            let label = Line::from(option.name.as_str()).fg(Color::Black);
            let label = if focused { label.bold().underlined() } else { label };
            frame.render_widget(
                Paragraph::new(label),
                Rect::new(x, force_row + 3, 6, 1).intersection(area),
            );
        }

        let ok = Button::new(centered_rect(area, 12, 3, area.y + area.height * 4 / 5), "OK");
        add_button(frame, &mut self.hits, &ok, Action::Options(OptionsAction::Ok));

        hint(
            frame,
            area,
            "Hint: Adjust the goal of the game. +/- choices, Space enables, F forces, Enter starts.",
        );
    }

    fn render_quiz(&mut self, frame: &mut Frame, area: Rect) {
        let Some(round) = &self.game.round else {
            return;
        };
        let cursor = self.game.input_state.cursor;

        let number = (round.question_index + 1).min(round.target_questions);
        frame.render_widget(
            Paragraph::new(Line::from(format!("Question {number: >2}")).bold().black()),
            Rect::new(area.x + 2, area.y + 1, 14, 1).intersection(area),
        );
        back_button(frame, &mut self.hits, area);

        let banner = format!("Find Color {}", round.correct_color().capitalized());
        frame.render_widget(
            TextBox::new(vec![Line::from(banner.clone()).bold().centered()], GOLD),
            centered_rect(area, banner.len() as u16 + 4, 3, area.y + 3),
        );

        let squares = round.squares();
        let count = squares.len().max(1) as u16;
        let width = (area.width / 5).saturating_sub(4).clamp(4, 24);
        let height = (width / 2).max(2);
        let slot = area.width / count;
        let top = area.y + area.height * 2 / 5 - height.min(area.height * 2 / 5) / 2;

        for (i, &name) in squares.iter().enumerate() {
            let x = area.x + slot * i as u16 + slot.saturating_sub(width) / 2;
            let rect = Rect::new(x, top, width, height).intersection(area);
            frame.render_widget(Block::new().style(Style::new().bg(name.color())), rect);
            self.hits.push((rect, Action::Quiz(QuizAction::Pick(i))));

            let key = Line::from(format!("[{}]", i + 1)).black();
            let key = if i == cursor { key.bold().reversed() } else { key };
            frame.render_widget(
                Paragraph::new(key).centered(),
                Rect::new(rect.x, rect.y + height + 1, width, 1).intersection(area),
            );

            if self.game.highlight == Some(i) && round.last_result != AnswerResult::None {
                frame.render_widget(
                    Block::bordered()
                        .border_type(BorderType::Thick)
                        .border_style(Style::new().fg(BROWN)),
                    inflate(rect, area),
                );
            }
        }

        let (text, face, color) = match round.last_result {
            AnswerResult::None => ("", "", Color::Reset),
            AnswerResult::Right => ("RIGHT !", "\\(^o^)/", Color::Green),
            AnswerResult::Wrong => ("WRONG !", "(T_T)", Color::Red),
        };
        if !text.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(face).bold().fg(color)).centered(),
                Rect::new(area.x, top + height + 3, area.width, 1).intersection(area),
            );
            frame.render_widget(
                Paragraph::new(Line::from(text).bold().fg(color)).centered(),
                Rect::new(area.x, area.bottom().saturating_sub(area.height / 9 + 3), area.width, 1)
                    .intersection(area),
            );
        }

        if round.awaiting_next {
            let rect = Rect::new(
                area.right().saturating_sub(14),
                area.bottom().saturating_sub(5),
                12,
                3,
            )
            .intersection(area);
            let next = Button::new(rect, "Next").focused(true);
            add_button(frame, &mut self.hits, &next, Action::Quiz(QuizAction::Next));
        }

        hint(frame, area, "Hint: Tap or click on a color square, or press its number, to answer.");
    }

    fn render_round_over(&mut self, frame: &mut Frame, area: Rect, score: u32) {
        frame.render_widget(Block::new().style(Style::new().bg(ROUND_OVER_GRAY)), area);
        heading(
            frame,
            area,
            &format!("Final Score: {score} %"),
            area.y + area.height / 5,
            Color::Black,
        );
        heading(
            frame,
            area,
            "Well Done!",
            area.y + (area.height / 2).saturating_sub(3),
            GOLD,
        );

        let mid = area.x + area.width / 2;
        let y = area.y + area.height / 2 + 2;
        for (i, (label, color, action)) in ROUND_OVER.into_iter().enumerate() {
            let x = if i == 0 { mid.saturating_sub(21) } else { mid + 1 };
            let rect = Rect::new(x, y, 20, 3).intersection(area);
            let button = Button::new(rect, label)
                .color(color)
                .focused(self.game.input_state.cursor == i);
            add_button(frame, &mut self.hits, &button, action);
        }
    }

    fn handle_crossterm_events(&mut self) -> Result<()> {
        match event::read()? {
            // it's important to check KeyEventKind::Press to avoid handling key release events
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(m) => {
                if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                    self.game.input_state.action = self
                        .hits
                        .iter()
                        .rev()
                        .find(|(rect, _)| hit(*rect, m.column, m.row))
                        .map(|&(_, action)| action);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.game.input_state.action = Some(Action::Quit);
            }
            (_, KeyCode::Esc | KeyCode::Backspace) => {
                self.game.input_state.action = Some(Action::Back);
            }
            (_, KeyCode::Left | KeyCode::Up) => self.move_cursor(Negative),
            (_, KeyCode::Right | KeyCode::Down) => self.move_cursor(Positive),
            (_, code) => self.game.input_state.action = self.screen_key(code),
        }
    }

    fn screen_key(&self, code: KeyCode) -> Option<Action> {
        let cursor = self.game.input_state.cursor;
        match self.game.screen {
            Screen::Menu => match code {
                KeyCode::Enter | KeyCode::Char(' ') => MENU.get(cursor).map(|&(_, _, a)| a),
                KeyCode::Char('f') => Some(Action::Menu(MenuAction::FindColors)),
                KeyCode::Char('o') => Some(Action::Menu(MenuAction::Options)),
                _ => None,
            },
            Screen::Options => {
                let color = ColorName::ALL.get(cursor).copied();
                match code {
                    KeyCode::Char('+' | '=') => {
                        Some(Action::Options(OptionsAction::ChangeChoices(Positive)))
                    }
                    KeyCode::Char('-') => Some(Action::Options(OptionsAction::ChangeChoices(Negative))),
                    KeyCode::Char(' ' | 't') => {
                        color.map(|c| Action::Options(OptionsAction::ToggleColor(c)))
                    }
                    KeyCode::Char('f') => color.map(|c| Action::Options(OptionsAction::ForceColor(c))),
                    KeyCode::Enter => Some(Action::Options(OptionsAction::Ok)),
                    _ => None,
                }
            }
            Screen::Quiz => {
                let round = self.game.round.as_ref()?;
                if round.is_over() {
                    return match code {
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            ROUND_OVER.get(cursor).map(|&(_, _, a)| a)
                        }
                        KeyCode::Char('n') => Some(Action::Quiz(QuizAction::NewGame)),
                        KeyCode::Char('x') => Some(Action::Quit),
                        _ => None,
                    };
                }
                match code {
                    KeyCode::Char(c @ '1'..='5') => {
                        Some(Action::Quiz(QuizAction::Pick(c as usize - '1' as usize)))
                    }
                    KeyCode::Enter | KeyCode::Char(' ') if round.awaiting_next => {
                        Some(Action::Quiz(QuizAction::Next))
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Quiz(QuizAction::Pick(cursor))),
                    KeyCode::Char('n') => Some(Action::Quiz(QuizAction::Next)),
                    _ => None,
                }
            }
        }
    }

    fn move_cursor(&mut self, sign: Sign) {
        self.game.move_cursor(sign);
        if let Screen::Options = self.game.screen {
            if let Some(&name) = ColorName::ALL.get(self.game.input_state.cursor) {
                self.cues.name_color(name);
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn add_button(frame: &mut Frame, hits: &mut Vec<(Rect, Action)>, button: &Button, action: Action) {
    frame.render_widget(button, button.rect);
    hits.push((button.rect, action));
}

fn back_button(frame: &mut Frame, hits: &mut Vec<(Rect, Action)>, area: Rect) {
    let rect = Rect::new(area.right().saturating_sub(12), area.y + 1, 10, 3).intersection(area);
    let back = Button::new(rect, "Back").color(Button::DARK_RED);
    add_button(frame, hits, &back, Action::Back);
}

fn checkbox(frame: &mut Frame, rect: Rect, color: Color, checked: bool, focused: bool) {
    let border = if focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };
    let block = Block::bordered()
        .border_type(border)
        .border_style(Style::new().fg(color));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if checked {
        frame.render_widget(Block::new().style(Style::new().bg(color)), inner);
    }
}

fn heading(frame: &mut Frame, area: Rect, text: &str, y: u16, color: Color) {
    frame.render_widget(
        Paragraph::new(Line::from(text).bold().fg(color)).centered(),
        Rect::new(area.x, y, area.width, 1).intersection(area),
    );
}

fn hint(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(text).white()),
        Rect::new(
            area.x + 2,
            area.bottom().saturating_sub(2),
            area.width.saturating_sub(4),
            1,
        )
        .intersection(area),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSpeaker;
    use crate::color::Catalog;
    use crate::config::GameConfig;
    use crate::settings::GameSettings;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> App {
        let options = Options::new(
            Catalog::with_enabled(&[ColorName::Red, ColorName::Green, ColorName::Blue]),
            GameSettings {
                num_choices: 3,
                forced_color: None,
            },
        );
        let game = ColorsGame::with_rng(options, 10, StdRng::seed_from_u64(2));
        let config = GameConfig {
            assets_dir: std::env::temp_dir().join("learning-colors-ui-no-assets"),
            speech_cache_dir: std::env::temp_dir().join("learning-colors-ui-speech"),
            ..GameConfig::default()
        };
        App::new(game, AudioCues::with_speaker(&config, Box::new(SilentSpeaker)))
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn click(app: &mut App, action: Action) {
        let (rect, _) = *app.hits.iter().find(|(_, a)| *a == action).unwrap();
        app.game.input_state.action = app
            .hits
            .iter()
            .rev()
            .find(|(r, _)| hit(*r, rect.x, rect.y))
            .map(|&(_, a)| a);
        app.game.update();
    }

    #[test]
    fn menu_shows_title_and_buttons() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("The Learning Colors Game"));
        assert!(screen.contains("Find Colors"));
        assert!(screen.contains("Quit"));
    }

    #[test]
    fn clicking_through_to_a_question() {
        let mut app = app();
        draw(&mut app);
        click(&mut app, Action::Menu(MenuAction::FindColors));
        assert!(draw(&mut app).contains("Number of choices:"));

        click(&mut app, Action::Options(OptionsAction::Ok));
        let screen = draw(&mut app);
        let correct = app.game.round.as_ref().unwrap().correct_color();
        assert!(screen.contains(&format!("Find Color {}", correct.capitalized())));
        assert!(screen.contains("Question  1"));

        let index = app.game.round.as_ref().unwrap().question.correct_index().unwrap();
        click(&mut app, Action::Quiz(QuizAction::Pick(index)));
        let screen = draw(&mut app);
        assert!(screen.contains("RIGHT !"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn number_keys_pick_squares() {
        let mut app = app();
        app.game.act(Action::Menu(MenuAction::FindColors));
        app.game.act(Action::Options(OptionsAction::Ok));
        assert_eq!(
            app.screen_key(KeyCode::Char('2')),
            Some(Action::Quiz(QuizAction::Pick(1)))
        );
        assert_eq!(app.screen_key(KeyCode::Char('9')), None);
    }

    #[test]
    fn options_keys_follow_cursor() {
        let mut app = app();
        app.game.act(Action::Menu(MenuAction::Options));
        app.move_cursor(Positive);
        assert_eq!(
            app.screen_key(KeyCode::Char('f')),
            Some(Action::Options(OptionsAction::ForceColor(ColorName::White)))
        );
        assert_eq!(
            app.screen_key(KeyCode::Char('+')),
            Some(Action::Options(OptionsAction::ChangeChoices(Positive)))
        );
    }
}
