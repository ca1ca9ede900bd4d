use stock_heatmap::domain::chart::{
    AnimationEngine, AnimationPhase, BarTarget, BarTransition, LevelKey, Rect, ease_cubic, lerp,
};
use stock_heatmap::domain::market_data::Side;

fn transition(bars: &[(Side, f64, f64)]) -> BarTransition {
    BarTransition {
        panel: Rect::new(700.0, 5.0, 100.0, 351.0),
        bar_height: 10.0,
        targets: bars
            .iter()
            .enumerate()
            .map(|(i, &(side, rate, length))| BarTarget {
                key: LevelKey::new(side, rate),
                qty: length / 10.0,
                top: i as f64 * 12.0,
                length,
            })
            .collect(),
    }
}

#[test]
fn easing_is_pinned_at_both_ends() {
    assert_eq!(ease_cubic(0.0), 0.0);
    assert_eq!(ease_cubic(0.5), 0.5);
    assert_eq!(ease_cubic(1.0), 1.0);
    assert_eq!(ease_cubic(3.0), 1.0);
    assert_eq!(lerp(17.3, 42.0, 1.0), 42.0);
}

#[test]
fn bars_converge_on_their_targets() {
    let mut engine = AnimationEngine::new(500.0);
    let generation = engine.restart(transition(&[(Side::Buy, 100.0, 50.0), (Side::Sell, 102.0, 100.0)]));

    let mut last = 0.0;
    for elapsed in [0.0, 100.0, 250.0, 400.0] {
        let frame = engine.tick(generation, elapsed).unwrap();
        assert!(!frame.is_final());
        let length = frame.bars[1].length;
        assert!(length >= last && length <= 100.0);
        last = length;
    }

    let frame = engine.tick(generation, 500.0).unwrap();
    assert!(frame.is_final());
    assert_eq!(frame.bars[0].length, 50.0);
    assert_eq!(frame.bars[1].length, 100.0);
    assert_eq!(engine.phase(), AnimationPhase::Idle);
    assert!(engine.tick(generation, 600.0).is_none());
}

#[test]
fn restart_continues_from_displayed_length() {
    let mut engine = AnimationEngine::new(500.0);
    let first = engine.restart(transition(&[(Side::Buy, 100.0, 80.0)]));
    engine.tick(first, 250.0);
    let mid = engine.state().length(&LevelKey::new(Side::Buy, 100.0)).unwrap();
    assert!(mid > 0.0 && mid < 80.0);

    let second = engine.restart(transition(&[(Side::Buy, 100.0, 20.0)]));
    assert_ne!(first, second);
    assert!(engine.tick(first, 300.0).is_none());

    let start = engine.tick(second, 0.0).unwrap();
    assert_eq!(start.bars[0].length, mid);
    let end = engine.tick(second, 500.0).unwrap();
    assert_eq!(end.bars[0].length, 20.0);
}

#[test]
fn same_rate_on_both_sides_animates_separately() {
    let mut engine = AnimationEngine::new(100.0);
    let generation = engine.restart(transition(&[(Side::Buy, 100.0, 30.0), (Side::Sell, 100.0, 90.0)]));
    let frame = engine.tick(generation, 100.0).unwrap();
    assert_eq!(frame.bars[0].length, 30.0);
    assert_eq!(frame.bars[1].length, 90.0);
    assert_eq!(engine.state().len(), 2);
}

#[test]
fn vanished_levels_are_evicted_after_one_transition() {
    let mut engine = AnimationEngine::new(100.0);
    let g = engine.restart(transition(&[(Side::Buy, 100.0, 30.0)]));
    engine.tick(g, 100.0);

    let g = engine.restart(transition(&[(Side::Sell, 101.0, 40.0)]));
    engine.tick(g, 100.0);
    assert!(engine.state().length(&LevelKey::new(Side::Buy, 100.0)).is_some());

    let g = engine.restart(transition(&[(Side::Sell, 101.0, 45.0)]));
    engine.tick(g, 100.0);
    assert!(engine.state().length(&LevelKey::new(Side::Buy, 100.0)).is_none());
    assert_eq!(engine.state().len(), 1);
}

#[test]
fn zero_duration_finishes_immediately() {
    let mut engine = AnimationEngine::new(0.0);
    let generation = engine.restart(transition(&[(Side::Sell, 5.0, 12.0)]));
    let frame = engine.tick(generation, 0.0).unwrap();
    assert!(frame.is_final());
    assert_eq!(frame.bars[0].length, 12.0);
}

#[test]
fn cancel_drops_pending_ticks() {
    let mut engine = AnimationEngine::new(500.0);
    let generation = engine.restart(transition(&[(Side::Buy, 1.0, 1.0)]));
    engine.cancel();
    assert!(!engine.is_animating());
    assert!(engine.tick(generation, 10.0).is_none());
}
