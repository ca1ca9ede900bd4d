use super::value_objects::Rect;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Side;
use crate::log_trace;
use ordered_float::OrderedFloat;
use std::collections::{HashMap, HashSet};

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// `a` at `t = 0`, exactly `b` at `t = 1`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Identity of one bar: a price level on one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelKey {
    pub side: Side,
    pub rate: OrderedFloat<f64>,
}

impl LevelKey {
    pub fn new(side: Side, rate: f64) -> Self {
        Self {
            side,
            rate: OrderedFloat(rate),
        }
    }
}

/// One bar of the latest snapshot with its destination length.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTarget {
    pub key: LevelKey,
    pub qty: f64,
    /// Top edge relative to the panel origin.
    pub top: f64,
    pub length: f64,
}

/// Bar-panel geometry frozen when a transition starts.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTransition {
    pub panel: Rect,
    pub bar_height: f64,
    pub targets: Vec<BarTarget>,
}

/// A bar as drawn on one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedBar {
    pub key: LevelKey,
    pub qty: f64,
    pub top: f64,
    pub length: f64,
}

/// Everything needed to repaint the bar panel for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPanelFrame {
    pub panel: Rect,
    pub bar_height: f64,
    pub bars: Vec<AnimatedBar>,
    pub progress: f64,
}

impl BarPanelFrame {
    pub fn is_final(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Displayed bar length per level, persisted across frames and snapshots.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    lengths: HashMap<LevelKey, f64>,
    previous_keys: HashSet<LevelKey>,
}

impl AnimationState {
    pub fn length(&self, key: &LevelKey) -> Option<f64> {
        self.lengths.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Drop levels absent from both `current` and the previous transition.
    fn evict(&mut self, current: &HashSet<LevelKey>) {
        let previous = std::mem::take(&mut self.previous_keys);
        self.lengths
            .retain(|key, _| current.contains(key) || previous.contains(key));
        self.previous_keys = current.clone();
    }

    fn advance(&mut self, key: LevelKey, target: f64, t: f64) -> f64 {
        let entry = self.lengths.entry(key).or_insert(0.0);
        *entry = lerp(*entry, target, t);
        *entry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating { generation: u64 },
}

/// Drives bar-length transitions. At most one transition is live; starting
/// a new one invalidates ticks issued for the old generation.
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    state: AnimationState,
    phase: AnimationPhase,
    generation: u64,
    duration_ms: f64,
    transition: Option<BarTransition>,
}

impl AnimationEngine {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            state: AnimationState::default(),
            phase: AnimationPhase::Idle,
            generation: 0,
            duration_ms,
            transition: None,
        }
    }

    pub fn set_duration(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, AnimationPhase::Animating { .. })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Cancel whatever is running and start towards `transition`.
    /// Returns the generation the caller must pass to [`Self::tick`].
    pub fn restart(&mut self, transition: BarTransition) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        let keys: HashSet<LevelKey> = transition.targets.iter().map(|t| t.key).collect();
        self.state.evict(&keys);
        self.transition = Some(transition);
        self.phase = AnimationPhase::Animating {
            generation: self.generation,
        };
        log_trace!(
            LogComponent::Domain("Animation"),
            "transition {} started with {} bars",
            self.generation,
            keys.len()
        );
        self.generation
    }

    pub fn cancel(&mut self) {
        self.phase = AnimationPhase::Idle;
    }

    /// Advance the transition of `generation` to `elapsed_ms`. Returns `None`
    /// for a stale generation or when idle; goes idle on the frame where the
    /// eased progress reaches 1.
    pub fn tick(&mut self, generation: u64, elapsed_ms: f64) -> Option<BarPanelFrame> {
        if self.phase != (AnimationPhase::Animating { generation }) {
            return None;
        }
        let transition = self.transition.as_ref()?;

        let raw = if self.duration_ms > 0.0 {
            elapsed_ms.max(0.0) / self.duration_ms
        } else {
            1.0
        };
        let progress = ease_cubic(raw).min(1.0);

        let bars = transition
            .targets
            .iter()
            .map(|target| AnimatedBar {
                key: target.key,
                qty: target.qty,
                top: target.top,
                length: self.state.advance(target.key, target.length, progress),
            })
            .collect();

        let frame = BarPanelFrame {
            panel: transition.panel,
            bar_height: transition.bar_height,
            bars,
            progress,
        };

        if frame.is_final() {
            self.phase = AnimationPhase::Idle;
            log_trace!(
                LogComponent::Domain("Animation"),
                "transition {} finished",
                generation
            );
        }
        Some(frame)
    }
}
