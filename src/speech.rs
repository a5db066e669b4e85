// ============================================
// src/speech.rs
// 英文の読み上げ (できなければ黙ってスキップする)
// ============================================

use std::io::ErrorKind;
use std::process::{Child, Command, Stdio};

/// 読み上げ役
///
/// 失敗しても呼び出し側には伝えない。ゲームの正誤には関係しない。
pub trait Speaker {
    fn speak(&mut self, text: &str, rate: f64);
}

impl<S: Speaker + ?Sized> Speaker for Box<S> {
    fn speak(&mut self, text: &str, rate: f64) {
        (**self).speak(text, rate);
    }
}

/// 何も喋らない (ログだけ残す)
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, text: &str, _rate: f64) {
        log::debug!("Skip speak: {}", preview(text));
    }
}

/// 外部の TTS コマンド (`espeak-ng`, `say` など) で読み上げる
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    current: Option<Child>,
    available: bool,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: None,
            available: true,
        }
    }

    /// 読み上げ中の音声を止める
    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }

    /// コマンドごとの速度指定
    fn rate_args(&self, rate: f64) -> Vec<String> {
        let program = std::path::Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.program);
        match program {
            // espeak 系は 1 分あたりの単語数 (標準 175)
            "espeak" | "espeak-ng" => vec!["-s".into(), ((175.0 * rate).round() as u32).to_string()],
            // macOS の say も単語数 (標準 ~180)
            "say" => vec!["-r".into(), ((180.0 * rate).round() as u32).to_string()],
            _ => Vec::new(),
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, rate: f64) {
        if !self.available {
            return;
        }
        self.cancel();

        let result = Command::new(&self.program)
            .args(self.rate_args(rate))
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            Ok(child) => {
                log::info!("Speaking: {}", preview(text));
                self.current = Some(child);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Speech disabled: '{}' not found", self.program);
                self.available = false;
            }
            Err(e) => log::error!("Speak ERR: {e}"),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// ログ用に先頭だけ切り出す
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(16).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_disables_speaker() {
        let mut speaker = CommandSpeaker::new("wordwiz-no-such-tts-program");
        speaker.speak("Yes we do", 1.0);
        assert!(!speaker.available);
        // 2 回目以降は何もしない
        speaker.speak("Yes we do", 1.0);
        assert!(speaker.current.is_none());
    }

    #[test]
    fn rate_args_follow_program() {
        assert_eq!(CommandSpeaker::new("espeak-ng").rate_args(1.0), ["-s", "175"]);
        assert_eq!(CommandSpeaker::new("/usr/bin/say").rate_args(0.5), ["-r", "90"]);
        assert!(CommandSpeaker::new("festival").rate_args(1.0).is_empty());
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("Yes we do"), "Yes we do");
        assert_eq!(preview("Go straight down this aisle"), "Go straight down...");
    }
}
