//! Session flow tests
//!
//! Drive a whole session through the public API without a terminal:
//! start → wrong answer → correct answer → next → results, and the
//! timeout recycle path.

use rand::SeedableRng;
use rand::rngs::StdRng;

use wordwiz::config::GameConfig;
use wordwiz::game::{CheckOutcome, FeedbackKind, Game, Phase};
use wordwiz::questions::{QuestionTemplate, builtin_bank};
use wordwiz::speech::Speaker;
use wordwiz::timer::{ManualTicks, TickSource};
use wordwiz::view::{GameView, Screen};

#[derive(Debug, Default)]
struct RecordingSpeaker {
    spoken: Vec<String>,
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str, _rate: f64) {
        self.spoken.push(text.to_string());
    }
}

fn new_game(bank: Vec<QuestionTemplate>, session_size: usize) -> Game<RecordingSpeaker> {
    let config = GameConfig {
        session_size,
        ..GameConfig::default()
    };
    Game::new(config, bank, StdRng::seed_from_u64(2024), RecordingSpeaker::default())
}

fn tax_question() -> Vec<QuestionTemplate> {
    vec![QuestionTemplate::new(
        "この価格は税込みですか？",
        "Is tax included in this price?",
        "Yes tax is included",
    )]
}

/// 正解文の順にカードを置く
fn answer_correctly(game: &mut Game<RecordingSpeaker>) {
    let ids: Vec<usize> = game.board().tiles().iter().map(|t| t.id).collect();
    for id in ids {
        assert!(game.toggle_tile(id));
    }
}

#[test]
fn one_question_session_end_to_end() {
    let mut game = new_game(tax_question(), 1);
    assert_eq!(GameView::from_game(&game).screen, Screen::Start);

    game.start().unwrap();
    assert_eq!(game.phase(), Phase::AwaitingInput);

    // 順番を間違える: "tax Yes is included"
    game.toggle_tile(1);
    game.toggle_tile(0);
    game.toggle_tile(2);
    game.toggle_tile(3);
    assert_eq!(game.check(), CheckOutcome::Incorrect);
    assert_eq!(game.feedback().unwrap().kind, FeedbackKind::Error);
    assert_eq!(game.phase(), Phase::AwaitingInput);
    assert_eq!(game.session().unwrap().current_index(), 0);
    assert!(!game.can_advance());

    // 並べ直す
    game.clear();
    answer_correctly(&mut game);
    let outcome = game.check();
    assert_eq!(outcome, CheckOutcome::Correct { points: 400 });
    assert_eq!(game.feedback().unwrap().kind, FeedbackKind::Success);
    assert_eq!(game.score(), 400);
    assert!(game.can_advance());

    assert!(game.next());
    assert_eq!(game.phase(), Phase::Results);
    let view = GameView::from_game(&game);
    assert_eq!(view.screen, Screen::Result);
    assert_eq!(view.summary.unwrap().final_score, 400);
}

#[test]
fn punctuation_in_tiles_is_ignored() {
    let bank = vec![QuestionTemplate::new("税込み？", "Tax?", "Yes tax is included.")];
    let mut game = new_game(bank, 1);
    game.start().unwrap();
    assert_eq!(game.board().tiles()[3].text, "included.");

    answer_correctly(&mut game);
    assert!(matches!(game.check(), CheckOutcome::Correct { .. }));
}

#[test]
fn timeout_grows_queue_and_session_runs_longer() {
    let bank: Vec<QuestionTemplate> = builtin_bank().into_iter().take(3).collect();
    let mut game = new_game(bank, 3);
    let mut ticks = ManualTicks::default();
    game.start().unwrap();

    // 1 問目は時間切れ
    ticks.advance(200);
    game.advance_ticks(ticks.elapsed_ticks());
    assert_eq!(game.phase(), Phase::TimedOut);
    assert_eq!(game.session().unwrap().queue_len(), 4);

    // 残りは全部正解
    let mut answered = 0;
    while game.phase() != Phase::Results {
        if game.phase() == Phase::AwaitingInput {
            answer_correctly(&mut game);
            assert!(matches!(game.check(), CheckOutcome::Correct { .. }));
            answered += 1;
        }
        assert!(game.next());
    }

    let session = game.session().unwrap();
    assert_eq!(answered, 3);
    assert_eq!(session.current_index(), 4);
    assert_eq!(session.queue_len(), 4);
    assert_eq!(session.correct_count(), 3);
    assert_eq!(game.score(), 1200);
}

#[test]
fn every_timeout_recycles_again() {
    let mut game = new_game(tax_question(), 1);
    game.start().unwrap();

    for expected_len in 2..5 {
        game.advance_ticks(200);
        assert_eq!(game.phase(), Phase::TimedOut);
        assert_eq!(game.session().unwrap().queue_len(), expected_len);
        game.next();
    }
    assert_eq!(game.current_question().unwrap().attempts, 4);
}

#[test]
fn speech_follows_the_lifecycle() {
    let mut game = new_game(tax_question(), 1);
    game.start().unwrap();
    game.advance_ticks(5);
    answer_correctly(&mut game);
    game.check();

    assert_eq!(
        game.speaker().spoken,
        ["Is tax included in this price?", "Yes tax is included"]
    );
}

#[test]
fn restart_after_results_starts_fresh() {
    let mut game = new_game(builtin_bank(), 2);
    game.start().unwrap();
    for _ in 0..2 {
        answer_correctly(&mut game);
        game.check();
        game.next();
    }
    assert_eq!(game.phase(), Phase::Results);
    assert!(game.score() > 0);

    game.restart().unwrap();
    assert_eq!(game.phase(), Phase::AwaitingInput);
    assert_eq!(game.score(), 0);
    assert_eq!(game.session().unwrap().queue_len(), 2);
}
