use rand::Rng;

use crate::*;

/// Symbolic input vocabulary delivered by the frontend; the engine never
/// sees raw key codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Reveal,
    Flag,
    Confirm,
    Retry,
    Menu,
    Quit,
}

/// What a handled event did; `Updated` is the renderer's redraw hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Updated,
    Exit,
}

impl EventOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Updated)
    }

    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Exit)
    }
}

const fn updated(changed: bool) -> EventOutcome {
    if changed {
        EventOutcome::Updated
    } else {
        EventOutcome::Ignored
    }
}

/// Read-only view of the active mode, for the renderer to draw from
/// between events.
#[derive(Copy, Clone, Debug)]
pub enum Screen<'a> {
    Menu(&'a MenuState),
    Game {
        session: &'a GameSession,
        cursor: Coord2,
    },
}

#[derive(Debug)]
enum Mode {
    Menu(MenuState),
    Game(GameMode),
}

#[derive(Debug)]
struct GameMode {
    session: GameSession,
    cursor: Coord2,
    difficulty: Difficulty,
}

impl GameMode {
    fn new(session: GameSession, difficulty: Difficulty) -> Self {
        Self {
            session,
            cursor: (0, 0),
            difficulty,
        }
    }

    /// Moves the cursor one step, clamped to the field edges; returns
    /// whether it actually moved.
    fn move_cursor(&mut self, dx: i32, dy: i32) -> bool {
        let config = self.session.config();
        let (x, y) = self.cursor;
        let next = (
            (x as i32 + dx).clamp(0, config.width as i32 - 1) as Coord,
            (y as i32 + dy).clamp(0, config.height as i32 - 1) as Coord,
        );
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }
}

/// Top-level state machine: exactly one of menu or game is active and all
/// routing follows that tag. Coordinates handed to the session are always
/// the clamped cursor, so the layers below never see an out-of-range
/// coordinate.
#[derive(Debug)]
pub struct App {
    mode: Mode,
}

impl App {
    /// Starts on the menu with the default preset.
    pub fn new() -> Self {
        Self {
            mode: Mode::Menu(MenuState::new()),
        }
    }

    /// The active screen snapshot.
    pub fn screen(&self) -> Screen<'_> {
        match &self.mode {
            Mode::Menu(menu) => Screen::Menu(menu),
            Mode::Game(game) => Screen::Game {
                session: &game.session,
                cursor: game.cursor,
            },
        }
    }

    /// Routes one input event to the active mode and applies any mode
    /// switch it causes.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<EventOutcome> {
        // the quit override runs before any mode-specific routing
        if matches!(event, InputEvent::Quit) {
            return Ok(EventOutcome::Exit);
        }
        let (outcome, next_mode) = match &mut self.mode {
            Mode::Menu(menu) => {
                let outcome = Self::route_menu(menu, event);
                (outcome, Self::take_menu_confirmation(menu)?)
            }
            Mode::Game(game) => Self::route_game(game, event)?,
        };
        if let Some(mode) = next_mode {
            self.mode = mode;
        }
        Ok(outcome)
    }

    fn route_menu(menu: &mut MenuState, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::Left => {
                menu.select_difficulty(-1);
                EventOutcome::Updated
            }
            InputEvent::Right => {
                menu.select_difficulty(1);
                EventOutcome::Updated
            }
            InputEvent::Confirm => {
                menu.confirm();
                EventOutcome::Updated
            }
            _ => EventOutcome::Ignored,
        }
    }

    /// Drains the menu's confirmed latch, starting a session on the chosen
    /// preset when one was requested.
    fn take_menu_confirmation(menu: &mut MenuState) -> Result<Option<Mode>> {
        if !menu.take_confirmed() {
            return Ok(None);
        }
        let difficulty = menu.difficulty();
        let session = GameSession::new(difficulty.config(), fresh_seed())?;
        log::debug!("starting {} game", difficulty.label());
        Ok(Some(Mode::Game(GameMode::new(session, difficulty))))
    }

    fn route_game(
        game: &mut GameMode,
        event: InputEvent,
    ) -> Result<(EventOutcome, Option<Mode>)> {
        if game.session.progress().is_finished() {
            return Self::route_game_over(game, event);
        }
        Ok(match event {
            InputEvent::Up => (updated(game.move_cursor(0, -1)), None),
            InputEvent::Down => (updated(game.move_cursor(0, 1)), None),
            InputEvent::Left => (updated(game.move_cursor(-1, 0)), None),
            InputEvent::Right => (updated(game.move_cursor(1, 0)), None),
            InputEvent::Reveal => (updated(game.session.reveal(game.cursor)?.has_update()), None),
            InputEvent::Flag => (updated(game.session.flag(game.cursor)?.has_update()), None),
            InputEvent::Menu => Self::back_to_menu(game),
            _ => (EventOutcome::Ignored, None),
        })
    }

    /// Post-game routing: only retry and the menu return stay live until a
    /// new session starts.
    fn route_game_over(
        game: &mut GameMode,
        event: InputEvent,
    ) -> Result<(EventOutcome, Option<Mode>)> {
        Ok(match event {
            InputEvent::Retry => {
                game.session = game.session.restart(fresh_seed())?;
                game.cursor = (0, 0);
                log::debug!("retrying {} game", game.difficulty.label());
                (EventOutcome::Updated, None)
            }
            InputEvent::Menu => Self::back_to_menu(game),
            _ => (EventOutcome::Ignored, None),
        })
    }

    fn back_to_menu(game: &GameMode) -> (EventOutcome, Option<Mode>) {
        log::debug!("returning to menu");
        (
            EventOutcome::Updated,
            Some(Mode::Menu(MenuState::with_difficulty(game.difficulty))),
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_app() -> App {
        App::new()
    }

    /// App dropped straight into game mode on a 3x3 board with the given
    /// mines, cursor at the origin.
    fn game_app(mines: &[Coord2]) -> App {
        let session = GameSession::with_field(MineField::with_mines(3, 3, mines).unwrap());
        App {
            mode: Mode::Game(GameMode::new(session, Difficulty::Beginner)),
        }
    }

    fn game_state(app: &App) -> (&GameSession, Coord2) {
        match app.screen() {
            Screen::Game { session, cursor } => (session, cursor),
            Screen::Menu(_) => panic!("expected game mode"),
        }
    }

    #[test]
    fn starts_on_the_menu() {
        let app = menu_app();
        let Screen::Menu(menu) = app.screen() else {
            panic!("expected menu mode");
        };
        assert_eq!(menu.difficulty(), Difficulty::Beginner);
    }

    #[test]
    fn quit_exits_from_the_menu() {
        let mut app = menu_app();
        let outcome = app.handle_event(InputEvent::Quit).unwrap();
        assert_eq!(outcome, EventOutcome::Exit);
        assert!(outcome.is_exit());
        assert!(matches!(app.screen(), Screen::Menu(_)));
    }

    #[test]
    fn quit_exits_mid_game_and_after_game_over() {
        let mut app = game_app(&[(2, 2)]);
        assert_eq!(app.handle_event(InputEvent::Quit).unwrap(), EventOutcome::Exit);

        app.handle_event(InputEvent::Right).unwrap();
        app.handle_event(InputEvent::Right).unwrap();
        app.handle_event(InputEvent::Down).unwrap();
        app.handle_event(InputEvent::Down).unwrap();
        app.handle_event(InputEvent::Reveal).unwrap();
        assert_eq!(game_state(&app).0.progress(), Progress::Lost);
        assert_eq!(app.handle_event(InputEvent::Quit).unwrap(), EventOutcome::Exit);
    }

    #[test]
    fn confirm_starts_a_game_on_the_selected_preset() {
        let mut app = menu_app();
        app.handle_event(InputEvent::Right).unwrap();
        assert_eq!(
            app.handle_event(InputEvent::Confirm).unwrap(),
            EventOutcome::Updated,
        );
        let (session, cursor) = game_state(&app);
        assert_eq!(session.config(), Difficulty::Intermediate.config());
        assert_eq!(session.progress(), Progress::Playing);
        assert_eq!(cursor, (0, 0));
    }

    #[test]
    fn menu_selection_wraps_both_ways() {
        let mut app = menu_app();
        app.handle_event(InputEvent::Left).unwrap();
        let Screen::Menu(menu) = app.screen() else {
            panic!("expected menu mode");
        };
        assert_eq!(menu.difficulty(), Difficulty::Expert);

        app.handle_event(InputEvent::Right).unwrap();
        let Screen::Menu(menu) = app.screen() else {
            panic!("expected menu mode");
        };
        assert_eq!(menu.difficulty(), Difficulty::Beginner);
    }

    #[test]
    fn menu_ignores_game_only_events() {
        let mut app = menu_app();
        let ignored = [
            InputEvent::Up,
            InputEvent::Down,
            InputEvent::Reveal,
            InputEvent::Flag,
            InputEvent::Retry,
            InputEvent::Menu,
        ];
        for event in ignored {
            assert_eq!(
                app.handle_event(event).unwrap(),
                EventOutcome::Ignored,
                "{event:?}",
            );
        }
        assert!(matches!(app.screen(), Screen::Menu(_)));
    }

    #[test]
    fn cursor_moves_and_clamps_at_the_edges() {
        let mut app = game_app(&[(2, 2)]);
        assert_eq!(app.handle_event(InputEvent::Up).unwrap(), EventOutcome::Ignored);
        assert_eq!(app.handle_event(InputEvent::Left).unwrap(), EventOutcome::Ignored);
        assert_eq!(app.handle_event(InputEvent::Right).unwrap(), EventOutcome::Updated);
        assert_eq!(game_state(&app).1, (1, 0));
        for _ in 0..5 {
            app.handle_event(InputEvent::Right).unwrap();
        }
        assert_eq!(game_state(&app).1, (2, 0));
        app.handle_event(InputEvent::Down).unwrap();
        assert_eq!(game_state(&app).1, (2, 1));
    }

    #[test]
    fn reveal_routes_to_the_cursor_tile() {
        let mut app = game_app(&[(2, 2)]);
        assert_eq!(app.handle_event(InputEvent::Reveal).unwrap(), EventOutcome::Updated);
        assert_eq!(game_state(&app).0.progress(), Progress::Won);
        // a second reveal lands in game-over routing and is dropped
        assert_eq!(app.handle_event(InputEvent::Reveal).unwrap(), EventOutcome::Ignored);
    }

    #[test]
    fn flag_routes_to_the_cursor_tile() {
        let mut app = game_app(&[(0, 0), (2, 2)]);
        assert_eq!(app.handle_event(InputEvent::Flag).unwrap(), EventOutcome::Updated);
        let (session, cursor) = game_state(&app);
        assert_eq!(session.field().tile_at(cursor).status(), TileStatus::Flagged);
        assert_eq!(session.progress(), Progress::Playing);
    }

    #[test]
    fn retry_is_ignored_while_playing() {
        let mut app = game_app(&[(2, 2)]);
        assert_eq!(app.handle_event(InputEvent::Retry).unwrap(), EventOutcome::Ignored);
        assert_eq!(game_state(&app).0.progress(), Progress::Playing);
    }

    #[test]
    fn retry_after_a_loss_restarts_with_the_same_config() {
        let mut app = game_app(&[(0, 0)]);
        app.handle_event(InputEvent::Reveal).unwrap();
        assert_eq!(game_state(&app).0.progress(), Progress::Lost);
        let config = game_state(&app).0.config();

        assert_eq!(app.handle_event(InputEvent::Retry).unwrap(), EventOutcome::Updated);
        let (session, cursor) = game_state(&app);
        assert_eq!(session.progress(), Progress::Playing);
        assert_eq!(session.config(), config);
        assert_eq!(session.field().tiles_remaining(), 8);
        assert_eq!(cursor, (0, 0));
    }

    #[test]
    fn game_over_ignores_board_events() {
        let mut app = game_app(&[(0, 0)]);
        app.handle_event(InputEvent::Reveal).unwrap();
        let dead = [
            InputEvent::Up,
            InputEvent::Down,
            InputEvent::Left,
            InputEvent::Right,
            InputEvent::Reveal,
            InputEvent::Flag,
            InputEvent::Confirm,
        ];
        for event in dead {
            assert_eq!(
                app.handle_event(event).unwrap(),
                EventOutcome::Ignored,
                "{event:?}",
            );
        }
        assert_eq!(game_state(&app).0.progress(), Progress::Lost);
    }

    #[test]
    fn menu_event_returns_with_the_played_preset_preselected() {
        let mut app = menu_app();
        app.handle_event(InputEvent::Left).unwrap();
        app.handle_event(InputEvent::Confirm).unwrap();
        assert!(matches!(app.screen(), Screen::Game { .. }));

        assert_eq!(app.handle_event(InputEvent::Menu).unwrap(), EventOutcome::Updated);
        let Screen::Menu(menu) = app.screen() else {
            panic!("expected menu mode");
        };
        assert_eq!(menu.difficulty(), Difficulty::Expert);
        assert!(!menu.is_confirmed());
    }

    #[test]
    fn menu_event_works_after_game_over_too() {
        let mut app = game_app(&[(0, 0)]);
        app.handle_event(InputEvent::Reveal).unwrap();
        assert_eq!(app.handle_event(InputEvent::Menu).unwrap(), EventOutcome::Updated);
        assert!(matches!(app.screen(), Screen::Menu(_)));
    }
}
