// ============================================
// src/view.rs
// 描画用のスナップショット (ゲーム状態から作るだけ)
// ============================================

use crate::game::{Cursor, Feedback, Game, Phase, Row};
use crate::speech::Speaker;

/// どの画面を出すか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Game,
    Result,
}

/// 表示用のカード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub id: usize,
    pub text: String,
    /// カーソルが乗っているか
    pub focused: bool,
}

/// 結果画面の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub final_score: u32,
    /// 正解した問題数
    pub correct: usize,
    /// 出題した問題数 (時間切れで戻ってきた分も含む)
    pub asked: usize,
    pub recycled: usize,
}

/// 1 フレーム分の表示内容
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub screen: Screen,
    pub prompt_text: String,
    /// 「3/10」
    pub counter: String,
    pub score: u32,
    /// タイマーバー (0.0..=1.0)
    pub timer_fraction: f64,
    pub time_left: f64,
    /// カード置き場 (文字列順)
    pub pool: Vec<TileView>,
    /// 回答欄 (選択順)
    pub tray: Vec<TileView>,
    pub feedback: Option<Feedback>,
    pub check_enabled: bool,
    /// 回答中だけ「回答する」「クリア」を出す
    pub show_edit_controls: bool,
    pub show_next: bool,
    pub is_success: bool,
    pub last_points: Option<u32>,
    pub summary: Option<ResultSummary>,
}

impl GameView {
    pub fn from_game<S: Speaker>(game: &Game<S>) -> Self {
        let screen = match game.phase() {
            Phase::Start => Screen::Start,
            Phase::Results => Screen::Result,
            _ => Screen::Game,
        };

        let cursor = game.cursor();
        let focus = |row: Row, index: usize| {
            screen == Screen::Game && game.is_editing() && cursor == Cursor { row, index }
        };

        let board = game.board();
        let pool = board
            .pool()
            .into_iter()
            .enumerate()
            .map(|(i, t)| TileView {
                id: t.id,
                text: t.text.clone(),
                focused: focus(Row::Pool, i),
            })
            .collect();
        let tray = board
            .tray()
            .into_iter()
            .enumerate()
            .map(|(i, t)| TileView {
                id: t.id,
                text: t.text.clone(),
                focused: focus(Row::Tray, i),
            })
            .collect();

        let (counter, summary) = match game.session() {
            Some(session) => {
                let (n, total) = session.progress();
                let summary = (screen == Screen::Result).then(|| ResultSummary {
                    final_score: session.score(),
                    correct: session.correct_count(),
                    asked: session.current_index(),
                    recycled: session.recycled_count(),
                });
                (format!("{n}/{total}"), summary)
            }
            None => (String::new(), None),
        };

        Self {
            screen,
            prompt_text: game
                .current_question()
                .map(|q| q.prompt_text().to_string())
                .unwrap_or_default(),
            counter,
            score: game.score(),
            timer_fraction: game.timer().fraction(),
            time_left: game.timer().time_left(),
            pool,
            tray,
            feedback: game.feedback().cloned(),
            check_enabled: game.can_check(),
            show_edit_controls: game.phase() == Phase::AwaitingInput,
            show_next: game.can_advance(),
            is_success: game.phase() == Phase::SuccessFeedback,
            last_points: game.last_points(),
            summary,
        }
    }
}
