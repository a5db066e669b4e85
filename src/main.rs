// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::{Result, stdout};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::prelude::*;

use wordwiz::config::Cli;
use wordwiz::game::Game;
use wordwiz::input::{Action, map_key};
use wordwiz::logger::{self, LogBuffer};
use wordwiz::questions::{builtin_bank, load_bank};
use wordwiz::speech::{CommandSpeaker, SilentSpeaker, Speaker};
use wordwiz::timer::{TickSource, WallClock};
use wordwiz::ui;
use wordwiz::view::GameView;

/// デバッグログ欄に出す行数
const DEBUG_LINES: usize = 5;

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 端末を切り替える前に設定まわりのエラーを出しておく
    let log_buffer = match logger::init(cli.log_file.as_deref()) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("wordwiz: {e}");
            std::process::exit(2);
        }
    };
    let bank = match &cli.bank {
        Some(path) => match load_bank(path) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("wordwiz: {e}");
                std::process::exit(2);
            }
        },
        None => builtin_bank(),
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let speaker: Box<dyn Speaker> = if cli.no_speech {
        Box::new(SilentSpeaker)
    } else {
        Box::new(CommandSpeaker::new(cli.speech_command.clone()))
    };
    let game = Game::new(cli.game_config(), bank, rng, speaker);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, game, &log_buffer, cli.debug);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(_terminal: &mut Terminal<impl Backend>) -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<impl Backend>,
    mut game: Game<Box<dyn Speaker>>,
    log_buffer: &LogBuffer,
    mut show_debug: bool,
) -> Result<()> {
    let mut clock = WallClock::new();
    log::info!("Script Loaded");

    loop {
        let view = GameView::from_game(&game);
        let log_lines = show_debug.then(|| log_buffer.recent(DEBUG_LINES));
        terminal.draw(|f| ui::draw(f, &view, log_lines.as_deref()))?;

        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key, view.screen) {
                        Some(Action::Quit) => break,
                        Some(Action::ToggleDebug) => show_debug = !show_debug,
                        Some(Action::Start) => {
                            if let Err(e) = game.start() {
                                log::error!("Start ERR: {e}");
                            }
                            clock = WallClock::new();
                        }
                        Some(action) => handle_action(&mut game, action),
                        None => {}
                    }
                }
            }
        }

        // 経過時間分だけ 100ms ティックを進める
        game.advance_ticks(clock.elapsed_ticks());
    }

    Ok(())
}

/// ゲーム画面の操作
fn handle_action(game: &mut Game<Box<dyn Speaker>>, action: Action) {
    match action {
        Action::CursorLeft => game.move_cursor(-1),
        Action::CursorRight => game.move_cursor(1),
        Action::SwitchRow => game.switch_row(),
        Action::Tap => {
            game.toggle_at_cursor();
        }
        Action::CheckOrNext => {
            // 「次へ」が出ていれば次へ、そうでなければ判定
            if game.can_advance() {
                game.next();
            } else {
                game.check();
            }
        }
        Action::PopLast => game.pop_last(),
        Action::Clear => game.clear(),
        Action::ReplayAudio => game.replay_audio(),
        Action::Start | Action::ToggleDebug | Action::Quit => {}
    }
}
