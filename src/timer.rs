// ============================================
// src/timer.rs
// 1 問ごとの制限時間 (100ms ごとに 0.1 減るカウントダウン)
// ============================================

use std::time::{Duration, Instant};

/// 1 ティックの長さ
pub const TICK: Duration = Duration::from_millis(100);

/// 1 ティックで減る時間
pub const TICK_UNITS: f64 = 0.1;

/// 時間 (単位: 秒相当) をティック数に変換する
pub fn units_to_ticks(units: f64) -> u32 {
    (units / TICK_UNITS).round().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 残り時間が 0 になった (1 回だけ発火する)
    Expired,
}

/// 論理カウントダウン
///
/// 実時間ではなくティック数で管理する。残り時間は整数のティック数で持つので
/// 20.0 からちょうど 200 ティックで 0 になる。
#[derive(Debug, Clone)]
pub struct Countdown {
    total_ticks: u32,
    remaining_ticks: u32,
    running: bool,
}

impl Countdown {
    pub fn new(total_ticks: u32) -> Self {
        Self {
            total_ticks,
            remaining_ticks: total_ticks,
            running: false,
        }
    }

    /// 満タンに戻して動かす
    pub fn start(&mut self) {
        self.remaining_ticks = self.total_ticks;
        self.running = true;
    }

    /// 止める。止めたあとは `tick` しても何も起きない
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 1 ティック進める
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.running = false;
            return Some(TimerEvent::Expired);
        }
        None
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// 残り時間 (秒相当)
    pub fn time_left(&self) -> f64 {
        self.remaining_ticks as f64 * TICK_UNITS
    }

    /// タイマーバー用の割合 (0.0..=1.0)
    pub fn fraction(&self) -> f64 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        (self.remaining_ticks as f64 / self.total_ticks as f64).clamp(0.0, 1.0)
    }
}

// --------------------------------------------------
// ティックの供給元
// --------------------------------------------------

/// ゲームに渡すティック数を決めるもの
///
/// 本番は `WallClock`、テストではティックを直接渡す。
pub trait TickSource {
    /// 前回呼ばれてから経過したティック数
    fn elapsed_ticks(&mut self) -> u32;
}

/// 実時間からティックを作る。端数は次回に持ち越す
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
    carry: Duration,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for WallClock {
    fn elapsed_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let mut elapsed = self.carry + now.duration_since(self.last);
        self.last = now;

        let mut ticks = 0;
        while elapsed >= TICK {
            elapsed -= TICK;
            ticks += 1;
        }
        self.carry = elapsed;
        ticks
    }
}

/// 決まった数のティックを返すだけのソース (テスト用)
#[derive(Debug, Default)]
pub struct ManualTicks {
    pending: u32,
}

impl ManualTicks {
    pub fn advance(&mut self, ticks: u32) {
        self.pending += ticks;
    }
}

impl TickSource for ManualTicks {
    fn elapsed_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once_after_full_duration() {
        let mut timer = Countdown::new(units_to_ticks(20.0));
        timer.start();

        let mut fired = 0;
        let mut ticks = 0;
        for _ in 0..250 {
            if timer.tick().is_some() {
                fired += 1;
            }
            if timer.is_running() {
                ticks += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(ticks, 199);
        assert_eq!(timer.time_left(), 0.0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = Countdown::new(10);
        timer.start();
        timer.tick();
        timer.cancel();
        assert!((0..100).all(|_| timer.tick().is_none()));
        assert_eq!(timer.remaining_ticks(), 9);
    }

    #[test]
    fn start_resets_remaining_time() {
        let mut timer = Countdown::new(200);
        timer.start();
        for _ in 0..147 {
            timer.tick();
        }
        assert!((timer.time_left() - 5.3).abs() < 1e-9);
        assert!((timer.fraction() - 0.265).abs() < 1e-9);

        timer.start();
        assert_eq!(timer.remaining_ticks(), 200);
        assert_eq!(timer.fraction(), 1.0);
    }

    #[test]
    fn manual_ticks_drain() {
        let mut source = ManualTicks::default();
        source.advance(3);
        source.advance(2);
        assert_eq!(source.elapsed_ticks(), 5);
        assert_eq!(source.elapsed_ticks(), 0);
    }

    #[test]
    fn wall_clock_starts_at_zero() {
        let mut clock = WallClock::new();
        assert_eq!(clock.elapsed_ticks(), 0);
    }
}
