#[path = "handlers/evaluate.rs"]
mod evaluate;

#[path = "handlers/helpers.rs"]
mod helpers;

pub use evaluate::{handle_evaluate, handle_health, handle_index};
