// ============================================
// src/config.rs
// コマンドライン引数とゲーム設定
// ============================================

use std::path::PathBuf;

use clap::Parser;

use crate::timer::units_to_ticks;

/// 1 問の制限時間 (秒相当)
pub const GAME_DURATION_PER_QUESTION: f64 = 20.0;
/// 正解したときの基本点
pub const POINTS_PER_QUESTION: u32 = 200;
/// 1 セッションの問題数
pub const SESSION_SIZE: usize = 10;
/// 出題してから読み上げるまでの待ち時間
pub const PROMPT_DELAY: f64 = 0.5;
/// 「Try Again!」を消すまでの時間
pub const FEEDBACK_HIDE_DELAY: f64 = 1.5;

/// WORD WiZ コマンドライン引数
#[derive(Debug, Parser)]
#[command(name = "wordwiz", version, about = "日本語のお題に英語の単語カードを並べて答えるクイズ")]
pub struct Cli {
    /// 1 セッションの問題数
    #[arg(short = 'n', long, default_value_t = SESSION_SIZE)]
    pub session_size: usize,

    /// 1 問の制限時間 (秒)
    #[arg(short, long, default_value_t = GAME_DURATION_PER_QUESTION)]
    pub duration: f64,

    /// シャッフル用の乱数シード (指定すると出題順が固定される)
    #[arg(long)]
    pub seed: Option<u64>,

    /// お題リストの JSON ファイル
    #[arg(long)]
    pub bank: Option<PathBuf>,

    /// 読み上げに使うコマンド
    #[arg(long, default_value = "espeak-ng")]
    pub speech_command: String,

    /// 読み上げ速度 (1.0 が標準)
    #[arg(long, default_value_t = 1.0)]
    pub speech_rate: f64,

    /// 読み上げを無効にする
    #[arg(long)]
    pub no_speech: bool,

    /// 起動時にデバッグログを表示する
    #[arg(long)]
    pub debug: bool,

    /// ログをファイルにも書き出す
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// 引数からゲーム設定を作る。範囲外の値は丸める
    pub fn game_config(&self) -> GameConfig {
        let duration = if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            log::warn!("Invalid duration {}, using default", self.duration);
            GAME_DURATION_PER_QUESTION
        };

        GameConfig {
            session_size: self.session_size.max(1),
            duration_ticks: units_to_ticks(duration).max(1),
            speech_rate: self.speech_rate.clamp(0.1, 10.0),
            ..GameConfig::default()
        }
    }
}

/// コアロジックに渡す設定
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub session_size: usize,
    pub duration_ticks: u32,
    pub points_per_question: u32,
    pub prompt_delay_ticks: u32,
    pub feedback_hide_ticks: u32,
    pub speech_rate: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_size: SESSION_SIZE,
            duration_ticks: units_to_ticks(GAME_DURATION_PER_QUESTION),
            points_per_question: POINTS_PER_QUESTION,
            prompt_delay_ticks: units_to_ticks(PROMPT_DELAY),
            feedback_hide_ticks: units_to_ticks(FEEDBACK_HIDE_DELAY),
            speech_rate: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_rules() {
        let config = GameConfig::default();
        assert_eq!(config.session_size, 10);
        assert_eq!(config.duration_ticks, 200);
        assert_eq!(config.points_per_question, 200);
        assert_eq!(config.prompt_delay_ticks, 5);
        assert_eq!(config.feedback_hide_ticks, 15);
    }

    #[test]
    fn cli_parses_options() {
        let cli = Cli::parse_from(["wordwiz", "-n", "3", "--duration", "12.5", "--seed", "42", "--no-speech"]);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.no_speech);

        let config = cli.game_config();
        assert_eq!(config.session_size, 3);
        assert_eq!(config.duration_ticks, 125);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cli = Cli::parse_from(["wordwiz", "-n", "0", "--duration", "0"]);
        let config = cli.game_config();
        assert_eq!(config.session_size, 1);
        assert_eq!(config.duration_ticks, 200);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
