use medianotes::{
    domain::{Action, ActionKind},
    ui_state::{IndicatorError, IndicatorMachine, IndicatorState, SHOW_DELAY, TimerQueue},
};
use std::{cell::RefCell, rc::Rc, time::Duration};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn machine() -> (Rc<TimerQueue>, IndicatorMachine, Rc<RefCell<Vec<IndicatorState>>>) {
    let queue = TimerQueue::new();
    let machine = IndicatorMachine::new(queue.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    // Subscriptions are not tied to the handle's lifetime
    let _ = machine.subscribe(move |s| sink.borrow_mut().push(*s));
    (queue, machine, seen)
}

#[test]
fn play_then_seek_keeps_groups_independent() {
    let (queue, m, _) = machine();

    m.dispatch(ActionKind::Play.into()).unwrap();
    queue.advance_to(ms(100));
    m.dispatch(ActionKind::SeekForward.into()).unwrap();

    queue.advance_to(ms(700));
    let s = m.snapshot();
    assert!(!s.play_visible);
    assert!(s.timestamp_visible && s.seek_forward_visible);

    queue.advance_to(ms(1700));
    assert!(!m.snapshot().any_visible());
}

#[test]
fn retrigger_shows_seek_twice_with_a_gap() {
    let (queue, m, seen) = machine();

    m.dispatch(ActionKind::SeekForward.into()).unwrap();
    queue.advance(ms(300));
    m.dispatch(ActionKind::SeekForward.into()).unwrap();
    queue.advance(ms(2000));

    let mut flags = seen
        .borrow()
        .iter()
        .map(|s| s.seek_forward_visible)
        .collect::<Vec<_>>();
    flags.dedup();
    assert_eq!(flags, vec![true, false, true, false]);
}

#[test]
fn at_most_one_action_glyph_after_any_sequence() {
    let (queue, m, seen) = machine();
    let script = [
        Action::from(ActionKind::Play),
        Action::set_speed(0.75),
        ActionKind::Pause.into(),
        ActionKind::SeekBackward.into(),
        ActionKind::TimestampActivated.into(),
        ActionKind::SeekForward.into(),
    ];

    for (i, action) in script.into_iter().enumerate() {
        m.dispatch(action).unwrap();
        queue.advance(ms(5 + 7 * i as u64));
    }
    queue.advance(SHOW_DELAY);

    for s in seen.borrow().iter() {
        let glyphs = [
            s.seek_forward_visible,
            s.seek_backward_visible,
            s.play_visible,
            s.pause_visible,
            s.speed_visible,
        ];
        assert!(glyphs.iter().filter(|v| **v).count() <= 1, "{s:?}");
    }
    assert!(m.snapshot().seek_forward_visible);
}

#[test]
fn speed_survives_every_hide() {
    let (queue, m, _) = machine();
    m.dispatch(Action::set_speed(1.5)).unwrap();
    queue.advance(ms(5000));

    let s = m.snapshot();
    assert!(!s.any_visible());
    assert_eq!(s.current_speed, 1.5);
}

#[test]
fn disposed_machine_refuses_dispatch() {
    let (queue, m, seen) = machine();
    m.dispatch(ActionKind::Play.into()).unwrap();
    m.dispose();
    m.dispose();

    assert_eq!(m.dispatch(ActionKind::Pause.into()), Err(IndicatorError::Disposed));
    queue.advance(ms(2000));
    assert!(seen.borrow().is_empty());
    assert_eq!(queue.pending(), 0);
}
