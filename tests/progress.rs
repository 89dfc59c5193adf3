use scrollfade_wasm::progress::DEFAULT_SCROLL_DOMAIN;
use scrollfade_wasm::{map_progress, ProgressMapper, ReferenceFrame, TransitionState};

fn frame() -> ReferenceFrame {
    ReferenceFrame::new(100.0, 300.0, 1200.0)
}

fn state_at(scroll: f64, count: usize) -> TransitionState {
    map_progress(&frame(), scroll, count, DEFAULT_SCROLL_DOMAIN)
}

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn before_region_is_first_pair_at_rest() {
    for scroll in [-50.0, 0.0, 50.0, 99.9] {
        for count in [2, 3, 5] {
            let state = state_at(scroll, count);
            assert_eq!((state.active_index, state.local_progress), (0, 0.0), "scroll={scroll}");
        }
    }
}

#[test]
fn past_region_is_last_pair_complete() {
    for scroll in [400.1, 500.0, 10_000.0] {
        for count in [2, 3, 5] {
            let state = state_at(scroll, count);
            assert_eq!(
                (state.active_index, state.local_progress),
                (count - 2, 1.0),
                "scroll={scroll} count={count}"
            );
        }
    }
}

#[test]
fn three_image_worked_example() {
    let start = state_at(100.0, 3);
    assert_eq!((start.active_index, start.local_progress), (0, 0.0));

    // 16.67% scrolled, 16.67 / 33 * 2 = 1.0101
    let mid = state_at(150.0, 3);
    assert_eq!(mid.active_index, 1);
    assert!(approx_eq(mid.local_progress, 0.0101, 1e-3), "{mid:?}");

    let end = state_at(400.0, 3);
    assert_eq!((end.active_index, end.local_progress), (1, 1.0));
}

#[test]
fn progress_stays_in_bounds() {
    for count in 2..=6 {
        let mut scroll = -100.0;
        while scroll <= 600.0 {
            let state = state_at(scroll, count);
            assert!(state.active_index <= count - 2, "count={count} scroll={scroll}");
            assert!((0.0..=1.0).contains(&state.local_progress));
            scroll += 0.5;
        }
    }
}

#[test]
fn progress_is_monotonic_in_scroll() {
    for count in 2..=6 {
        let mut last = state_at(-10.0, count);
        let mut scroll = -10.0;
        while scroll <= 500.0 {
            let state = state_at(scroll, count);
            assert!(state.active_index >= last.active_index, "count={count} scroll={scroll}");
            if state.active_index == last.active_index {
                assert!(
                    state.local_progress >= last.local_progress,
                    "count={count} scroll={scroll}"
                );
            }
            last = state;
            scroll += 0.25;
        }
    }
}

#[test]
fn mapper_follows_resized_region() {
    let mut mapper = ProgressMapper::new(3, DEFAULT_SCROLL_DOMAIN);
    mapper.on_resize(frame());
    assert_eq!(mapper.on_scroll(400.0).active_index, 1);

    // The region moved further down the page after a layout change.
    mapper.on_resize(ReferenceFrame::new(800.0, 600.0, 3000.0));
    let state = mapper.on_scroll(400.0);
    assert_eq!((state.active_index, state.local_progress), (0, 0.0));
    assert_eq!(mapper.state(), state);
}

#[test]
fn two_images_blend_once_over_the_domain() {
    // 99 px of a 300 px region is 33%, the end of the default domain.
    let half = state_at(100.0 + 49.5, 2);
    assert_eq!(half.active_index, 0);
    assert!(approx_eq(half.local_progress, 0.5, 1e-4), "{half:?}");

    let done = state_at(100.0 + 99.0, 2);
    assert_eq!((done.active_index, done.local_progress), (0, 1.0));
}
