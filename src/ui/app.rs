use crate::ai::Agent;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Human versus AI game in the terminal. The AI replies as soon as the
/// human's move lands.
pub struct App {
    game_state: GameState,
    ai: Agent,
    rows: usize,
    cols: usize,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// `ai` plays its own seat; the human takes the other one.
    pub fn new(ai: Agent, rows: usize, cols: usize) -> Self {
        let mut app = App {
            game_state: GameState::initial(rows, cols),
            ai,
            rows,
            cols,
            selected_column: cols / 2, // Start in middle
            should_quit: false,
            message: None,
        };
        app.ai_turn();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game_state = GameState::initial(self.rows, self.cols);
                self.selected_column = self.cols / 2;
                self.message = Some("New game started!".to_string());
                self.ai_turn();
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column, then let the AI reply
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(()) => {
                self.announce_outcome();
                self.ai_turn();
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Play the AI's move if it is the AI's turn.
    fn ai_turn(&mut self) {
        if self.game_state.is_terminal() || self.game_state.current_player() != self.ai.player() {
            return;
        }

        let result = self
            .ai
            .choose_move(self.game_state.board())
            .map_err(|e| e.to_string())
            .and_then(|column| {
                self.game_state
                    .apply_move_mut(column)
                    .map(|()| column)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(column) => {
                self.message = Some(format!("{} played column {}", self.ai.name(), column + 1));
                self.announce_outcome();
            }
            Err(e) => {
                self.message = Some(format!("AI failed to move: {e}"));
            }
        }
    }

    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.game_state.outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner(player) if player == self.ai.player() => {
                    format!("{} wins!", self.ai.name())
                }
                GameOutcome::Winner(_) => "You win!".to_string(),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &self.ai.to_string(),
        );
    }
}
