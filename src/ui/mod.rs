//! Terminal UI: play Connect Four against a search agent.

mod app;
mod game_view;

pub use app::App;
