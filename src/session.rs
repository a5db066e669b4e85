// ============================================
// src/session.rs
// 1 回のプレイ (セッション) で出題する問題キュー
// ============================================

use rand::Rng;

use crate::error::GameError;
use crate::questions::QuestionTemplate;

/// セッション内の問題の識別子 (キューに何度入っても同じ問題を指す)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(usize);

/// 原本をコピーした出題用の問題
#[derive(Debug, Clone, PartialEq)]
pub struct SessionQuestion {
    pub template: QuestionTemplate,
    pub answered_correctly: bool,
    /// 出題された回数 (時間切れで戻ってくるたびに増える)
    pub attempts: u32,
}

impl SessionQuestion {
    fn new(template: QuestionTemplate) -> Self {
        Self {
            template,
            answered_correctly: false,
            attempts: 0,
        }
    }

    pub fn prompt_text(&self) -> &str {
        &self.template.prompt_text
    }

    pub fn audio_text(&self) -> &str {
        &self.template.audio_text
    }

    pub fn target_sentence(&self) -> &str {
        &self.template.target_sentence
    }
}

/// Fisher-Yates でその場シャッフル
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// セッションの状態
///
/// `queue` は伸びるだけで縮まない。`current_index` も増えるだけ。
#[derive(Debug, Clone)]
pub struct SessionState {
    questions: Vec<SessionQuestion>,
    queue: Vec<QuestionId>,
    current_index: usize,
    score: u32,
}

impl SessionState {
    /// お題リストをシャッフルして先頭 `session_size` 問でセッションを作る
    pub fn start<R: Rng>(
        bank: &[QuestionTemplate],
        session_size: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if bank.is_empty() {
            return Err(GameError::invalid_state("cannot start a session from an empty bank"));
        }
        if session_size == 0 {
            return Err(GameError::invalid_state("session size must be at least 1"));
        }

        let mut shuffled: Vec<&QuestionTemplate> = bank.iter().collect();
        shuffle(&mut shuffled, rng);

        let questions: Vec<SessionQuestion> = shuffled
            .into_iter()
            .take(session_size)
            .map(|t| SessionQuestion::new(t.clone()))
            .collect();
        let queue = (0..questions.len()).map(QuestionId).collect();

        log::info!("Session started with {} questions", questions.len());
        Ok(Self {
            questions,
            queue,
            current_index: 0,
            score: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> &[QuestionId] {
        &self.queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 全問終わったか (`current_index >= queue.len()`)
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.queue.len()
    }

    pub fn current_id(&self) -> Option<QuestionId> {
        self.queue.get(self.current_index).copied()
    }

    pub fn question(&self, id: QuestionId) -> Option<&SessionQuestion> {
        self.questions.get(id.0)
    }

    pub fn current(&self) -> Option<&SessionQuestion> {
        self.current_id().and_then(|id| self.question(id))
    }

    fn current_mut(&mut self) -> Result<&mut SessionQuestion, GameError> {
        let id = self
            .current_id()
            .ok_or_else(|| GameError::invalid_state("no current question"))?;
        self.questions
            .get_mut(id.0)
            .ok_or_else(|| GameError::invalid_state(format!("question {id:?} is not in the session")))
    }

    /// 出題開始時に呼ぶ。出題回数を数える
    pub fn begin_current(&mut self) -> Result<&SessionQuestion, GameError> {
        let question = self.current_mut()?;
        question.attempts += 1;
        Ok(&*question)
    }

    pub fn mark_current_correct(&mut self) -> Result<(), GameError> {
        self.current_mut()?.answered_correctly = true;
        Ok(())
    }

    /// 今の問題を同じ ID のままキューの末尾に戻す
    pub fn recycle_current(&mut self) -> Result<QuestionId, GameError> {
        let question = self.current_mut()?;
        question.answered_correctly = false;
        let id = self
            .current_id()
            .ok_or_else(|| GameError::invalid_state("no current question"))?;
        self.queue.push(id);
        log::info!("Recycled question {:?} (queue length {})", id, self.queue.len());
        Ok(id)
    }

    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// 次の問題へ。インデックスは増えるだけ
    pub fn advance(&mut self) {
        self.current_index += 1;
    }

    /// 画面の「X/Y」表示用
    pub fn progress(&self) -> (usize, usize) {
        ((self.current_index + 1).min(self.queue.len()), self.queue.len())
    }

    /// 正解済みの問題数
    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.answered_correctly).count()
    }

    /// 時間切れでキューに戻された回数
    pub fn recycled_count(&self) -> usize {
        self.queue.len() - self.questions.len()
    }

    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }
}
