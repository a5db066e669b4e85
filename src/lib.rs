// ============================================
// src/lib.rs
// WORD WiZ のゲームロジック (端末なしでも動かせる部分)
// ============================================

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logger;
pub mod questions;
pub mod session;
pub mod speech;
pub mod tiles;
pub mod timer;
pub mod ui;
pub mod validator;
pub mod view;

pub use error::GameError;
pub use game::{CheckOutcome, Game, Phase};
pub use questions::QuestionTemplate;
pub use view::{GameView, Screen};
