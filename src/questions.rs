/*
 * src/questions.rs
 * お題データを管理するモジュール
 */

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// お題 1 件分 (変更されない原本)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    /// 画面に出す日本語のお題
    pub prompt_text: Cow<'static, str>,
    /// 読み上げる英語の質問
    pub audio_text: Cow<'static, str>,
    /// 正解の英文 (スペース区切りでカードになる)
    pub target_sentence: Cow<'static, str>,
}

impl QuestionTemplate {
    /// 組み込みリスト用
    pub const fn from_static(
        prompt_text: &'static str,
        audio_text: &'static str,
        target_sentence: &'static str,
    ) -> Self {
        Self {
            prompt_text: Cow::Borrowed(prompt_text),
            audio_text: Cow::Borrowed(audio_text),
            target_sentence: Cow::Borrowed(target_sentence),
        }
    }

    pub fn new(
        prompt_text: impl Into<String>,
        audio_text: impl Into<String>,
        target_sentence: impl Into<String>,
    ) -> Self {
        Self {
            prompt_text: Cow::Owned(prompt_text.into()),
            audio_text: Cow::Owned(audio_text.into()),
            target_sentence: Cow::Owned(target_sentence.into()),
        }
    }
}

const fn q(prompt: &'static str, audio: &'static str, sentence: &'static str) -> QuestionTemplate {
    QuestionTemplate::from_static(prompt, audio, sentence)
}

/// 問題リスト (売り場での接客フレーズ)
pub const QUESTIONS_LIST: &[QuestionTemplate] = &[
    // 売り場・フロア案内
    q("コミック売り場はどこですか？", "Where are the comics?", "Go straight down this aisle and it's on your left"),
    q("ここは何階ですか？", "What floor is this?", "This is the third floor"),
    q("ここから新館に行けますか？", "Can I go to the new building from here?", "The third floor is not connected to the new building"),
    q("2階へはどう行けばいいですか？", "How do I get to the 2nd floor?", "Take the escalator down to the second floor"),
    q("エスカレーターはどこですか？", "Where is the escalator?", "The escalator is over there"),
    q("（商品画像を見せて）これありますか？", "Do you have this?", "We don't have it"),
    q("電気屋さんはどこですか？", "Where is the electronics store?", "The electronics store is on the fourth floor of the new building"),

    // 会計
    q("これ、免税になりますか？", "Is this tax-free?", "It's not a duty-free shop"),
    q("この価格は税込みですか？", "Is tax included in this price?", "Yes tax is included"),
    q("プレゼント包装できますか？", "Can you wrap this for a gift?", "Certainly free of charge"),
    q("クレジットカード使えますか？", "Do you accept credit cards?", "Yes we do"),
    q("返品できますか？", "Can I return this?", "I'm sorry we don't accept returns"),
    q("交通系ICカードは使えますか？", "Can I use Suica or Pasmo?", "Yes you can use transportation IC cards"),

    // その他
    q("営業時間は何時までですか？", "What time do you close?", "We are open until nine PM"),
    q("（本を指して）一番人気はどれですか？", "Which one is the most popular?", "This novel is the number one bestseller"),
    q("文房具は置いていますか？", "Do you sell stationery?", "Stationery is on the left side of the store"),
    q("袋はいりますか？（店員役として）", "Do you need a bag?", "Plastic bags cost five yen"),
];

/// 正解したときにランダムで出すメッセージ
pub const ENCOURAGEMENT: &[&str] = &[
    "完璧！🎉",
    "素晴らしい！⭐",
    "すごい！🌟",
    "よくできました！💯",
    "最高！✨",
    "その調子！🔥",
    "天才！💎",
    "パーフェクト！🏆",
];

/// 組み込みのお題をコピーして返す
pub fn builtin_bank() -> Vec<QuestionTemplate> {
    QUESTIONS_LIST.to_vec()
}

/// JSON ファイルからお題リストを読み込む
///
/// 形式は `[{"prompt_text": .., "audio_text": .., "target_sentence": ..}, ..]`。
/// 空のリストや空の正解文はエラーにする。
pub fn load_bank(path: &Path) -> Result<Vec<QuestionTemplate>, GameError> {
    let file = File::open(path).map_err(|source| GameError::BankIo {
        path: path.to_path_buf(),
        source,
    })?;
    let bank: Vec<QuestionTemplate> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| GameError::BankFormat {
            path: path.to_path_buf(),
            source,
        })?;

    if bank.is_empty() {
        return Err(GameError::EmptyBank);
    }
    if let Some(bad) = bank.iter().position(|q| q.target_sentence.trim().is_empty()) {
        return Err(GameError::invalid_state(format!(
            "question #{bad} in {} has an empty target sentence",
            path.display()
        )));
    }

    log::info!("Loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}
