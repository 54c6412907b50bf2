use crate::api::types::EntityId;

/// Fixed timestep accumulator.
/// Ensures player logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Identifies a pending timer. Scheduling a key that is already pending replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Debounced stroke commit.
    IdleCommit,
    /// Active-slot highlight toggle on blink stages.
    Blink,
    /// Start fading a hint glyph.
    HintFade(EntityId),
    /// Send a feedback sprite back to hiding.
    SpriteHide(EntityId),
    /// Cheat editor save button returns to its resting state.
    SaveStatus,
}

/// Who owns a timer. Stage timers die with their stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    Stage,
    Editor,
}

#[derive(Debug, Clone)]
struct Timer {
    key: TimerKey,
    deadline: f64,
    interval: Option<f64>,
    scope: TimerScope,
    epoch: u32,
}

/// A timer that came due during `Timers::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub key: TimerKey,
    /// Stage epoch the timer was scheduled in.
    pub epoch: u32,
}

const DEADLINE_EPSILON: f64 = 1e-4;

/// Single-threaded timer wheel driven by the fixed timestep.
/// Clock and deadlines are f64 seconds.
#[derive(Debug, Default)]
pub struct Timers {
    now: f64,
    epoch: u32,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the player started.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Current stage epoch; bumped by every `cancel_stage`.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Fire `key` once after `delay` seconds, replacing any pending timer with the same key.
    pub fn schedule(&mut self, key: TimerKey, delay: f32, scope: TimerScope) {
        self.insert(key, delay, None, scope);
    }

    /// Fire `key` every `period` seconds until canceled.
    pub fn schedule_interval(&mut self, key: TimerKey, period: f32, scope: TimerScope) {
        self.insert(key, period, Some(period), scope);
    }

    fn insert(&mut self, key: TimerKey, delay: f32, interval: Option<f32>, scope: TimerScope) {
        self.cancel(key);
        self.pending.push(Timer {
            key,
            deadline: self.now + f64::from(delay),
            interval: interval.map(f64::from),
            scope,
            epoch: self.epoch,
        });
    }

    /// Cancel a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.key != key);
        before != self.pending.len()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.iter().any(|t| t.key == key)
    }

    /// Seconds until `key` fires, if pending.
    pub fn remaining(&self, key: TimerKey) -> Option<f32> {
        self.pending
            .iter()
            .find(|t| t.key == key)
            .map(|t| (t.deadline - self.now).max(0.0) as f32)
    }

    /// Drop every stage-scoped timer and start a new epoch.
    pub fn cancel_stage(&mut self) {
        self.pending.retain(|t| t.scope != TimerScope::Stage);
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Advance the clock. Returns the timers that came due, earliest first.
    /// Intervals re-arm for their next period.
    pub fn advance(&mut self, dt: f32) -> Vec<Fired> {
        self.now += f64::from(dt);
        let now = self.now;

        let mut due: Vec<(f64, Fired)> = Vec::new();
        self.pending.retain_mut(|t| {
            if t.deadline > now + DEADLINE_EPSILON {
                return true;
            }
            due.push((t.deadline, Fired { key: t.key, epoch: t.epoch }));
            match t.interval {
                Some(period) => {
                    t.deadline += period;
                    true
                }
                None => false,
            }
        });

        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, fired)| fired).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
