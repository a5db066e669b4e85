// ============================================
// src/ui.rs
// UI描画 (ratatui)
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::game::FeedbackKind;
use crate::view::{GameView, Screen, TileView};

/// デバッグログ欄の高さ
const DEBUG_PANEL_HEIGHT: u16 = 6;

/// 1 フレーム描画する。`log_lines` があれば下にデバッグログ欄を出す
pub fn draw(f: &mut Frame, view: &GameView, log_lines: Option<&[String]>) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Word Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let (main_area, debug_area) = match log_lines {
        Some(_) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(DEBUG_PANEL_HEIGHT)])
                .split(inner_area);
            (chunks[0], Some(chunks[1]))
        }
        None => (inner_area, None),
    };

    match view.screen {
        Screen::Start => draw_start(f, main_area),
        Screen::Game => draw_game(f, view, main_area),
        Screen::Result => draw_result(f, view, main_area),
    }

    if let (Some(area), Some(lines)) = (debug_area, log_lines) {
        draw_debug(f, lines, area);
    }
}

fn draw_start(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("WORD WiZ").style(Style::default().fg(Color::Cyan).bold()),
        Line::from(""),
        Line::from("日本語の質問に、英語の答えを単語カードで組み立てよう"),
        Line::from("制限時間内に早く答えるほど高得点！"),
        Line::from(""),
        Line::from("Enter でスタート / Esc で終了").style(Style::default().fg(Color::Yellow)),
    ];
    f.render_widget(Paragraph::new(lines).centered(), centered_rows(area, 6));
}

fn draw_game(f: &mut Frame, view: &GameView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] スコアと問題番号
            Constraint::Length(1), // [1] タイマーバー
            Constraint::Length(1), // [2] 空白
            Constraint::Length(1), // [3] 日本語のお題
            Constraint::Length(1), // [4] 空白
            Constraint::Length(4), // [5] 回答欄
            Constraint::Min(3),    // [6] カード置き場
            Constraint::Length(1), // [7] フィードバック
            Constraint::Length(1), // [8] 操作説明
        ])
        .split(area);

    // 0. ステータスバー
    let mut status = vec![
        Span::styled(format!("Q {}", view.counter), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(format!("Score: {}", view.score), Style::default().fg(Color::Yellow)),
    ];
    if let (true, Some(points)) = (view.is_success, view.last_points) {
        status.push(Span::styled(
            format!("  (+{points})"),
            Style::default().fg(Color::Green),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(status)), chunks[0]);

    // 1. タイマーバー
    let ratio = view.timer_fraction.clamp(0.0, 1.0);
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{:.1}s", view.time_left));
    f.render_widget(gauge, chunks[1]);

    // 3. お題
    f.render_widget(
        Paragraph::new(view.prompt_text.as_str())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[3],
    );

    // 5. 回答欄 (選択順)
    let tray_style = if view.is_success {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    };
    f.render_widget(
        Paragraph::new(tile_line(&view.tray, tray_style))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("回答")),
        chunks[5],
    );

    // 6. カード置き場 (文字列順)
    f.render_widget(
        Paragraph::new(tile_line(&view.pool, Style::default().fg(Color::Black).bg(Color::Gray)))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("カード")),
        chunks[6],
    );

    // 7. フィードバック
    if let Some(feedback) = &view.feedback {
        let style = match feedback.kind {
            FeedbackKind::Success => Style::default().fg(Color::Green).bold(),
            FeedbackKind::Error => Style::default().fg(Color::Red).bold(),
            FeedbackKind::None => Style::default().fg(Color::White),
        };
        f.render_widget(
            Paragraph::new(feedback.message.as_str()).style(style).centered(),
            chunks[7],
        );
    }

    // 8. 操作説明 (表示中のボタンだけ)
    let help = if view.show_next {
        "Enter: 次へ   r: もう一度聞く   Esc: 終了".to_string()
    } else if view.show_edit_controls {
        let check = if view.check_enabled { "Enter: 回答する" } else { "" };
        format!("←→: 選ぶ  ↑↓: 段を切替  Space: 置く/戻す  {check}  x: クリア  r: もう一度聞く")
    } else {
        String::new()
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)).centered(),
        chunks[8],
    );
}

fn draw_result(f: &mut Frame, view: &GameView, area: Rect) {
    let mut lines = vec![
        Line::from("結果").style(Style::default().fg(Color::Cyan).bold()),
        Line::from(""),
    ];
    match &view.summary {
        Some(summary) => {
            lines.push(
                Line::from(format!("Score: {}", summary.final_score))
                    .style(Style::default().fg(Color::Yellow).bold()),
            );
            lines.push(Line::from(format!(
                "正解 {} 問 / 出題 {} 問 (時間切れ {} 回)",
                summary.correct, summary.asked, summary.recycled
            )));
        }
        None => lines.push(Line::from(format!("Score: {}", view.score))),
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from("Enter でもう一度 / Esc で終了").style(Style::default().fg(Color::Yellow)),
    );
    let height = lines.len() as u16;
    f.render_widget(Paragraph::new(lines).centered(), centered_rows(area, height));
}

fn draw_debug(f: &mut Frame, lines: &[String], area: Rect) {
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::TOP).title("debug")),
        area,
    );
}

/// カードを色付きで横に並べる。カーソル位置は反転表示
fn tile_line(tiles: &[TileView], style: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(tiles.len() * 2);
    for tile in tiles {
        let style = if tile.focused {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        };
        spans.push(Span::styled(format!(" {} ", tile.text), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// 縦方向の中央に `height` 行分の領域を取る
fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = area.y + (area.height - height) / 2;
    Rect::new(area.x, top, area.width, height)
}
