// Host-side tests for loop state, intro easing and the glow clock.

use globe_core::lifecycle::{ease_out_quad, GlowClock, IntroAnimation, LoopState};

#[test]
fn pause_then_resume_asks_for_a_new_frame() {
    let mut s = LoopState::new(false);
    assert!(s.should_tick() && s.should_schedule());
    s.pause();
    assert_eq!(s, LoopState::Paused);
    assert!(!s.should_tick() && !s.should_schedule());
    assert!(s.resume());
    assert_eq!(s, LoopState::Running);
    // already running: nothing to reschedule
    assert!(!s.resume());
}

#[test]
fn can_start_paused() {
    let s = LoopState::new(true);
    assert_eq!(s, LoopState::Paused);
}

#[test]
fn destroyed_is_terminal() {
    let mut s = LoopState::new(false);
    s.destroy();
    s.pause();
    assert!(!s.resume());
    assert!(s.is_destroyed());
    assert!(!s.should_tick() && !s.should_schedule());
}

#[test]
fn ease_out_quad_endpoints() {
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
    assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
    assert_eq!(ease_out_quad(3.0), 1.0);
}

#[test]
fn intro_reaches_full_scale_at_two_seconds() {
    let mut intro = IntroAnimation::default();
    assert_eq!(intro.scale(), 0.0);
    intro.advance(1.0);
    assert!((intro.scale() - 0.75).abs() < 1e-6);
    assert!(!intro.is_finished());
    intro.advance(1.0);
    assert!((intro.scale() - 1.0).abs() < 1e-6);
    assert!(intro.is_finished());
    intro.advance(5.0);
    assert_eq!(intro.scale(), 1.0);
}

#[test]
fn intro_ignores_negative_dt() {
    let mut intro = IntroAnimation::default();
    intro.advance(-1.0);
    assert_eq!(intro.scale(), 0.0);
}

#[test]
fn glow_clock_counts_down_and_wraps() {
    let mut clock = GlowClock::default();
    assert_eq!(clock.value, 100.0);
    let mut min = f32::MAX;
    let mut wrapped_at = None;
    for i in 1..=400 {
        clock.tick();
        min = min.min(clock.value);
        if clock.value == 100.0 && wrapped_at.is_none() {
            wrapped_at = Some(i);
        }
    }
    assert_eq!(min, -101.0);
    assert_eq!(wrapped_at, Some(202));
}
