// ============================================
// src/game.rs
// 1 問ごとの流れ (出題 → 回答 → 判定 → 正解/時間切れ → 次へ → 結果)
// ============================================

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::questions::{ENCOURAGEMENT, QuestionTemplate};
use crate::session::{SessionQuestion, SessionState};
use crate::speech::Speaker;
use crate::tiles::TileBoard;
use crate::timer::{Countdown, TimerEvent};
use crate::validator;

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// ゲームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// スタート画面
    Start,
    /// カードを並べている (タイマー動作中)
    AwaitingInput,
    /// 正解した。「次へ」待ち
    SuccessFeedback,
    /// 時間切れ。問題はキューの末尾に戻してある。「次へ」待ち
    TimedOut,
    /// 全問終了
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    None,
    Success,
    Error,
}

/// 画面に出すメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    fn new(message: impl Into<String>, kind: FeedbackKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// 「回答する」を押した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// 判定しなかった (判定中、回答欄が空、回答中でない)
    Ignored,
    Correct { points: u32 },
    Incorrect,
    /// 判定中にエラーが起きたので時間切れと同じ扱いにした
    Failed,
}

/// カーソルのある段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Pool,
    Tray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: Row,
    pub index: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: Row::Pool,
            index: 0,
        }
    }
}

/// 正解時の得点: 基本点 + 残り時間 × 10 (切り上げ)
///
/// 残り時間はティック単位 (0.1) なので、浮動小数点の誤差で 1 点ずれないよう
/// 小数第 6 位で丸めてから切り上げる。
pub fn score_for_answer(points_per_question: u32, time_left: f64) -> u32 {
    let bonus = (time_left.max(0.0) * 10.0 * 1e6).round() / 1e6;
    (points_per_question as f64 + bonus).ceil() as u32
}

// --------------------------------------------------
// ゲーム本体
// --------------------------------------------------

/// ゲーム全体の状態を管理する
///
/// 画面はこの状態から作るだけで、逆方向に書き換えることはない。
pub struct Game<S: Speaker> {
    config: GameConfig,
    bank: Vec<QuestionTemplate>,
    rng: StdRng,
    speaker: S,

    phase: Phase,
    session: Option<SessionState>,
    board: TileBoard,
    timer: Countdown,
    /// 判定中 (と正解表示中) は true。カード操作と二重判定を止める
    is_checking: bool,

    feedback: Option<Feedback>,
    /// フィードバックを消すまでの残りティック
    feedback_hide_in: Option<u32>,
    /// 読み上げまでの残りティック
    prompt_in: Option<u32>,

    cursor: Cursor,
    last_points: Option<u32>,
}

impl<S: Speaker> Game<S> {
    pub fn new(config: GameConfig, bank: Vec<QuestionTemplate>, rng: StdRng, speaker: S) -> Self {
        let timer = Countdown::new(config.duration_ticks);
        Self {
            config,
            bank,
            rng,
            speaker,
            phase: Phase::Start,
            session: None,
            board: TileBoard::default(),
            timer,
            is_checking: false,
            feedback: None,
            feedback_hide_in: None,
            prompt_in: None,
            cursor: Cursor::default(),
            last_points: None,
        }
    }

    // MARK: 参照用

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> Option<&SessionQuestion> {
        self.session.as_ref().and_then(SessionState::current)
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, SessionState::score)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_checking(&self) -> bool {
        self.is_checking
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn last_points(&self) -> Option<u32> {
        self.last_points
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    /// カード操作ができるか
    pub fn is_editing(&self) -> bool {
        self.phase == Phase::AwaitingInput && !self.is_checking
    }

    /// 「回答する」ボタンが押せるか
    pub fn can_check(&self) -> bool {
        self.is_editing() && !self.board.is_empty_selection()
    }

    /// 「次へ」ボタンが出ているか
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::SuccessFeedback | Phase::TimedOut)
    }

    // MARK: セッション開始

    /// 新しいセッションを作って最初の問題を出す (リトライも同じ)
    pub fn start(&mut self) -> Result<(), GameError> {
        log::info!("Init Game");
        let session = SessionState::start(&self.bank, self.config.session_size, &mut self.rng)?;
        self.session = Some(session);
        self.last_points = None;
        self.load_question();
        Ok(())
    }

    /// 結果画面からもう一度
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.start()
    }

    /// 現在のインデックスの問題を出す。キューを使い切っていたら結果画面へ
    fn load_question(&mut self) {
        self.timer.cancel();
        self.feedback = None;
        self.feedback_hide_in = None;
        self.prompt_in = None;
        self.is_checking = false;
        self.cursor = Cursor::default();

        let Some(session) = self.session.as_mut() else {
            self.phase = Phase::Start;
            return;
        };
        log::info!("Load Q: {}", session.current_index());

        if session.is_finished() {
            log::info!("Game Over (score {})", session.score());
            self.board = TileBoard::default();
            self.phase = Phase::Results;
            return;
        }

        let sentence = match session.begin_current() {
            Ok(question) => question.target_sentence().to_string(),
            Err(e) => {
                log::error!("Load ERR: {e}");
                self.phase = Phase::Results;
                return;
            }
        };

        self.board = TileBoard::new(&sentence);
        self.timer.start();
        self.phase = Phase::AwaitingInput;

        if self.config.prompt_delay_ticks == 0 {
            self.speak_prompt();
        } else {
            self.prompt_in = Some(self.config.prompt_delay_ticks);
        }
    }

    // MARK: カード操作

    /// カードを回答欄に入れる / 戻す
    pub fn toggle_tile(&mut self, id: usize) -> bool {
        if !self.is_editing() {
            return false;
        }
        let toggled = self.board.toggle(id);
        self.clamp_cursor();
        toggled
    }

    /// 回答欄を空にする
    pub fn clear(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.board.clear();
        self.cursor = Cursor::default();
    }

    /// 最後に置いたカードを戻す
    pub fn pop_last(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.board.pop_last();
        self.clamp_cursor();
    }

    /// カーソルを左右に動かす
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.row_len(self.cursor.row);
        if len == 0 {
            self.cursor.index = 0;
            return;
        }
        let index = self.cursor.index as isize + delta;
        self.cursor.index = index.clamp(0, len as isize - 1) as usize;
    }

    /// カード置き場 ⇔ 回答欄
    pub fn switch_row(&mut self) {
        self.cursor.row = match self.cursor.row {
            Row::Pool => Row::Tray,
            Row::Tray => Row::Pool,
        };
        self.clamp_cursor();
    }

    /// カーソル位置のカードをタップする
    pub fn toggle_at_cursor(&mut self) -> bool {
        let id = match self.cursor.row {
            Row::Pool => self.board.pool().get(self.cursor.index).map(|t| t.id),
            Row::Tray => self.board.tray().get(self.cursor.index).map(|t| t.id),
        };
        match id {
            Some(id) => self.toggle_tile(id),
            None => false,
        }
    }

    fn row_len(&self, row: Row) -> usize {
        match row {
            Row::Pool => self.board.pool().len(),
            Row::Tray => self.board.selection().len(),
        }
    }

    fn clamp_cursor(&mut self) {
        if self.row_len(self.cursor.row) == 0 {
            let other = match self.cursor.row {
                Row::Pool => Row::Tray,
                Row::Tray => Row::Pool,
            };
            if self.row_len(other) > 0 {
                self.cursor.row = other;
            }
        }
        let len = self.row_len(self.cursor.row);
        self.cursor.index = self.cursor.index.min(len.saturating_sub(1));
    }

    // MARK: 判定

    /// 「回答する」
    ///
    /// 判定中にエラーが起きても画面が止まらないよう、時間切れと同じ扱いで終わらせる。
    pub fn check(&mut self) -> CheckOutcome {
        log::info!("Check Btn Clicked");
        if !self.can_check() {
            return CheckOutcome::Ignored;
        }
        self.is_checking = true;

        match self.evaluate() {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Check CRASH: {e}");
                self.is_checking = false;
                self.time_up();
                CheckOutcome::Failed
            }
        }
    }

    fn evaluate(&mut self) -> Result<CheckOutcome, GameError> {
        let target = self
            .current_question()
            .map(|q| q.target_sentence().to_string())
            .ok_or_else(|| GameError::invalid_state("check without a current question"))?;

        let built = self.board.built_sentence();
        log::info!("Built: \"{built}\"");

        let is_correct =
            validator::check_answer(self.board.selection(), self.board.tiles(), &target);
        log::info!("Result: {is_correct}");

        if !is_correct {
            self.feedback = Some(Feedback::new("Try Again!", FeedbackKind::Error));
            self.feedback_hide_in = Some(self.config.feedback_hide_ticks);
            self.is_checking = false;
            return Ok(CheckOutcome::Incorrect);
        }

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| GameError::invalid_state("check without a session"))?;
        session.mark_current_correct()?;

        let points = score_for_answer(self.config.points_per_question, self.timer.time_left());
        session.award(points);
        self.last_points = Some(points);

        let message = ENCOURAGEMENT[self.rng.random_range(0..ENCOURAGEMENT.len())];
        self.feedback = Some(Feedback::new(message, FeedbackKind::Success));

        self.speaker.speak(&built, self.config.speech_rate);
        self.finish_question(true);
        Ok(CheckOutcome::Correct { points })
    }

    /// 問題を締める。失敗ならキューの末尾に戻す
    fn finish_question(&mut self, is_success: bool) {
        log::info!("FinishQ: {is_success}");
        self.timer.cancel();
        self.prompt_in = None;
        self.feedback_hide_in = None;

        if is_success {
            self.phase = Phase::SuccessFeedback;
            return;
        }

        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.recycle_current() {
                log::error!("Recycle ERR: {e}");
            }
        }
        self.phase = Phase::TimedOut;
    }

    /// 時間切れ
    fn time_up(&mut self) {
        log::info!("Time Up");
        let target = self.current_question().map(|q| q.target_sentence().to_string());
        match target {
            Some(target) => {
                self.feedback = Some(Feedback::new(
                    format!("Time's Up! Correct: {target}"),
                    FeedbackKind::None,
                ));
                self.speaker.speak(&target, self.config.speech_rate);
            }
            None => {
                self.feedback = Some(Feedback::new("Time's Up!", FeedbackKind::None));
            }
        }
        self.finish_question(false);
    }

    // MARK: 進行

    /// 「次へ」
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        log::info!("Next Clicked");
        if let Some(session) = self.session.as_mut() {
            session.advance();
        }
        self.load_question();
        true
    }

    /// お題の英語をもう一度読み上げる
    pub fn replay_audio(&mut self) {
        if self.phase == Phase::Start || self.phase == Phase::Results {
            return;
        }
        self.speak_prompt();
    }

    fn speak_prompt(&mut self) {
        let audio = self.current_question().map(|q| q.audio_text().to_string());
        if let Some(audio) = audio {
            self.speaker.speak(&audio, self.config.speech_rate);
        }
    }

    /// 100ms ごとに呼ぶ
    ///
    /// 読み上げ待ち → フィードバックの自動非表示 → タイマー の順に進める。
    pub fn tick(&mut self) {
        if let Some(remaining) = self.prompt_in {
            if remaining <= 1 {
                self.prompt_in = None;
                self.speak_prompt();
            } else {
                self.prompt_in = Some(remaining - 1);
            }
        }

        if let Some(remaining) = self.feedback_hide_in {
            if remaining <= 1 {
                self.feedback_hide_in = None;
                if !self.is_checking {
                    self.feedback = None;
                }
            } else {
                self.feedback_hide_in = Some(remaining - 1);
            }
        }

        if self.phase == Phase::AwaitingInput {
            if let Some(TimerEvent::Expired) = self.timer.tick() {
                self.time_up();
            }
        }
    }

    pub fn advance_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}
