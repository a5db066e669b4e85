// ============================================
// src/validator.rs
// 回答文の組み立てと正誤判定
// ============================================

use crate::tiles::Tile;

/// 比較の前に取り除く記号
const IGNORED_PUNCTUATION: [char; 4] = ['.', ',', '?', '!'];

/// 選択順の ID をカードの文字列に置き換え、スペースでつなぐ
///
/// 対応するカードがない ID は読み飛ばす。
pub fn build_candidate(selection: &[usize], tiles: &[Tile]) -> String {
    selection
        .iter()
        .filter_map(|id| tiles.iter().find(|t| t.id == *id))
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `. , ? !` を除去して小文字化し、前後の空白を落とす
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// 組み立てた文が正解と一致するか
pub fn check_answer(selection: &[usize], tiles: &[Tile], target_sentence: &str) -> bool {
    let built = build_candidate(selection, tiles);
    is_correct(&built, target_sentence)
}

/// 正規化後の文字列どうしを比べる
pub fn is_correct(built: &str, target_sentence: &str) -> bool {
    normalize(built) == normalize(target_sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::build_tiles;

    fn tile(id: usize, text: &str) -> Tile {
        Tile {
            id,
            text: text.to_string(),
            selected: true,
        }
    }

    #[test]
    fn ignores_case_and_punctuation() {
        let tiles = vec![tile(0, "Yes"), tile(1, "tax"), tile(2, "is"), tile(3, "included.")];
        assert!(check_answer(&[0, 1, 2, 3], &tiles, "Yes tax is included"));
        assert!(is_correct("yes, TAX is included!", "Yes tax is included?"));
    }

    #[test]
    fn word_order_matters() {
        let tiles = build_tiles("Yes we do");
        assert!(!check_answer(&[1, 0, 2], &tiles, "Yes we do"));
        assert!(!check_answer(&[0, 1], &tiles, "Yes we do"));
    }

    #[test]
    fn every_sentence_round_trips() {
        for q in crate::questions::QUESTIONS_LIST {
            let tiles = build_tiles(&q.target_sentence);
            let order: Vec<usize> = tiles.iter().map(|t| t.id).collect();
            assert!(check_answer(&order, &tiles, &q.target_sentence), "{}", q.target_sentence);
        }
    }

    #[test]
    fn missing_ids_are_skipped() {
        let tiles = build_tiles("Yes we do");
        assert_eq!(build_candidate(&[0, 7, 1, 2], &tiles), "Yes we do");
        assert!(check_answer(&[0, 7, 1, 2], &tiles, "Yes we do"));
    }

    #[test]
    fn apostrophes_are_kept() {
        assert_eq!(normalize(" It's not a duty-free shop. "), "it's not a duty-free shop");
        assert!(!is_correct("Its not a duty-free shop", "It's not a duty-free shop"));
    }
}
