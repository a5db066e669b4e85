// ============================================
// src/tiles.rs
// 単語カード (タイル) と選択順の管理
// ============================================

/// 単語カード 1 枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// 正解文を分割したときの位置 (表示順とは無関係)
    pub id: usize,
    pub text: String,
    pub selected: bool,
}

/// 正解文をスペースで分割してカードにする
///
/// 句読点は考慮しない。`"Yes tax is included."` なら最後のカードは `"included."`。
pub fn build_tiles(sentence: &str) -> Vec<Tile> {
    sentence
        .split(' ')
        .enumerate()
        .map(|(id, word)| Tile {
            id,
            text: word.to_string(),
            selected: false,
        })
        .collect()
}

/// 1 問分のカードと、プレイヤーが並べた順番
///
/// `selection` に入っている ID と `selected == true` のカードは常に一対一。
#[derive(Debug, Clone, Default)]
pub struct TileBoard {
    tiles: Vec<Tile>,
    selection: Vec<usize>,
}

impl TileBoard {
    pub fn new(sentence: &str) -> Self {
        Self {
            tiles: build_tiles(sentence),
            selection: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// 回答欄の並び (左から順)
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn is_empty_selection(&self) -> bool {
        self.selection.is_empty()
    }

    /// カードをタップしたときの処理
    ///
    /// 未選択なら回答欄の末尾に追加、選択済みなら回答欄から外す。
    /// 存在しない ID は無視して `false` を返す。
    pub fn toggle(&mut self, id: usize) -> bool {
        let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) else {
            return false;
        };

        if tile.selected {
            tile.selected = false;
            self.selection.retain(|&sid| sid != id);
        } else {
            tile.selected = true;
            self.selection.push(id);
        }
        true
    }

    /// 回答欄を空にする
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.selected = false;
        }
        self.selection.clear();
    }

    /// 最後に置いたカードを戻す (Backspace)
    pub fn pop_last(&mut self) -> Option<usize> {
        let id = self.selection.pop()?;
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) {
            tile.selected = false;
        }
        Some(id)
    }

    /// 未選択カード。並び順から正解が推測できないよう文字列順 (大文字小文字は区別しない) に並べる
    pub fn pool(&self) -> Vec<&Tile> {
        let mut pool: Vec<&Tile> = self.tiles.iter().filter(|t| !t.selected).collect();
        pool.sort_by(|a, b| {
            a.text
                .to_lowercase()
                .cmp(&b.text.to_lowercase())
                .then_with(|| a.text.cmp(&b.text))
                .then(a.id.cmp(&b.id))
        });
        pool
    }

    /// 回答欄のカード (選択順)
    pub fn tray(&self) -> Vec<&Tile> {
        self.selection
            .iter()
            .filter_map(|id| self.tiles.iter().find(|t| t.id == *id))
            .collect()
    }

    /// 回答欄の単語をスペースでつないだ文
    pub fn built_sentence(&self) -> String {
        crate::validator::build_candidate(&self.selection, &self.tiles)
    }
}
