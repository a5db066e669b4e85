// ============================================
// src/input.rs
// キー入力 → ゲーム操作
// ============================================

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::Screen;

/// プレイヤーの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorLeft,
    CursorRight,
    /// カード置き場 ⇔ 回答欄
    SwitchRow,
    /// カーソル位置のカードをタップ
    Tap,
    /// 「回答する」 (回答欄が確定していれば「次へ」)
    CheckOrNext,
    /// 最後のカードを戻す
    PopLast,
    Clear,
    ReplayAudio,
    /// スタート / リトライ
    Start,
    ToggleDebug,
    Quit,
}

/// キーを操作に変換する。画面ごとに使えるキーが違う
pub fn map_key(key: KeyEvent, screen: Screen) -> Option<Action> {
    // どの画面でも使えるもの
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::F(12) => return Some(Action::ToggleDebug),
        _ => {}
    }

    match screen {
        Screen::Start | Screen::Result => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Game => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::CursorRight),
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') | KeyCode::Char('k') => {
                Some(Action::SwitchRow)
            }
            KeyCode::Char(' ') => Some(Action::Tap),
            KeyCode::Enter => Some(Action::CheckOrNext),
            KeyCode::Backspace => Some(Action::PopLast),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::Clear),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::ReplayAudio),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => None,
        },
    }
}
