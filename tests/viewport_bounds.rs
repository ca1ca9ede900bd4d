use quickcheck_macros::quickcheck;
use stock_heatmap::domain::chart::{
    ChartOptions, ChartState, Dimensions, MIN_WINDOW_LENGTH, Viewport, ViewportCommand,
};
use stock_heatmap::domain::market_data::{
    DepthLevel, MarketDepth, Price, Quantity, QuoteStats, Snapshot,
};

fn snapshot(second: usize) -> Snapshot {
    Snapshot::new(
        format!("11:{:02}:{:02}", second / 60 % 60, second % 60),
        MarketDepth {
            last_traded_price: Price::from(200.0),
            last_traded_qty: Quantity::from(2.0),
            buy_order_volume: Quantity::from(5.0),
            sell_order_volume: Quantity::from(4.0),
            buys: vec![DepthLevel::new(199.5, 1.0, 1)],
            sells: vec![DepthLevel::new(200.5, 1.0, 1)],
            quote: QuoteStats::default(),
        },
    )
}

fn in_bounds(state: &ChartState) -> bool {
    let len = state.series.len();
    let viewport = &state.viewport;
    viewport.window_length() >= MIN_WINDOW_LENGTH
        && viewport.window_position() <= len.saturating_sub(viewport.window_length())
}

#[quickcheck]
fn window_stays_inside_series(initial: u8, ops: Vec<(u8, i16)>) -> bool {
    let mut state = ChartState::new(ChartOptions::default(), Dimensions::new(800.0, 400.0));
    state.set_data((0..initial as usize).map(snapshot).collect());
    if !in_bounds(&state) {
        return false;
    }

    for (kind, arg) in ops {
        let arg = arg as i64;
        match kind % 5 {
            0 => {
                let next = state.series.len();
                state.add_data(snapshot(next));
            }
            1 => {
                state.move_data_window(arg);
            }
            2 => {
                state.set_zoom_level(arg);
            }
            3 => {
                state.apply(ViewportCommand::Shift { delta: arg % 8 });
            }
            _ => {
                let command = if arg < 0 {
                    ViewportCommand::ZoomIn
                } else {
                    ViewportCommand::ZoomOut
                };
                state.apply(command);
            }
        }
        if !in_bounds(&state) {
            return false;
        }
    }
    true
}

#[quickcheck]
fn zoom_is_clamped(len: u8, requested: i32) -> bool {
    let len = len as usize;
    let mut viewport = Viewport::new(40);
    let before = viewport.clone();
    viewport.set_zoom_level(requested as i64, len);

    if len <= MIN_WINDOW_LENGTH {
        return viewport == before;
    }
    let expected = (requested as i64).clamp(MIN_WINDOW_LENGTH as i64, len as i64 - 1) as usize;
    viewport.window_length() == expected
        && viewport.window_position() <= len - viewport.window_length()
}

#[quickcheck]
fn zoom_keeps_right_edge_when_room(start: u8, requested: u8) -> bool {
    let len = 200;
    let mut viewport = Viewport::new(40);
    viewport.move_to(start as i64 % 161, len);
    let right_edge = viewport.window_position() + viewport.window_length();

    viewport.set_zoom_level(requested as i64, len);
    let shifted = right_edge as i64 - viewport.window_length() as i64;
    if shifted < 0 {
        viewport.window_position() == 0
    } else {
        viewport.window_position() + viewport.window_length() == right_edge
    }
}

#[quickcheck]
fn following_tail_twice_is_idempotent(len: u8, window: u8) -> bool {
    let len = len as usize;
    let mut viewport = Viewport::new(window as usize);
    viewport.follow_tail(len);
    let first = viewport.clone();
    let moved_again = viewport.follow_tail(len);
    !moved_again && viewport == first
}
