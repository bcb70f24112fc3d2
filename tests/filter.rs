use log_channel::filter::{filter_fn, Decision, DenyFilter, Filter, FilterResult, PassFilter};
use log_channel::transport::Capture;
use log_channel::{Channel, Event};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::Level;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Trail = Arc<Mutex<Vec<&'static str>>>;

// A filter that writes its name to `trail` every time it is tested.
fn recorder(name: &'static str, result: FilterResult, trail: &Trail) -> impl Filter {
    let trail = Arc::clone(trail);
    filter_fn(move |_: &Event| {
        trail.lock().unwrap().push(name);
        result
    })
}

fn event() -> Event {
    Event::new(Level::INFO, "hello").with_target("app")
}

#[test]
fn test_filters_run_in_insertion_order() -> TestResult {
    let trail = Trail::default();
    let mut channel = Channel::builder("ordered").build(Capture::new())?;

    channel.add_filter(recorder("f1", FilterResult::Neutral, &trail));
    channel.add_filter(recorder("f2", FilterResult::Neutral, &trail));
    channel.add_filter(recorder("f3", FilterResult::Neutral, &trail));

    assert!(channel.filters().len() == 3);
    channel.send(&event())?;
    assert!(*trail.lock().unwrap() == ["f1", "f2", "f3"]);

    Ok(())
}

#[test]
fn test_clear_filters_empties_chain() -> TestResult {
    let trail = Trail::default();
    let mut channel = Channel::builder("cleared").build(Capture::new())?;

    channel.add_filter(recorder("f1", FilterResult::Neutral, &trail));
    channel.add_filter(recorder("f2", FilterResult::Deny, &trail));
    channel.add_filter(recorder("f3", FilterResult::Neutral, &trail));
    channel.clear_filters();
    assert!(channel.filters().len() == 0);

    channel.add_filter(recorder("f4", FilterResult::Neutral, &trail));
    assert!(channel.filters().len() == 1);

    let decision = channel.send(&event())?;
    assert!(decision == Decision::Accept);
    assert!(*trail.lock().unwrap() == ["f4"]);

    Ok(())
}

#[test]
fn test_deny_short_circuits() -> TestResult {
    let trail = Trail::default();
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("denied").build(capture)?;

    channel.add_filter(recorder("a", FilterResult::Neutral, &trail));
    channel.add_filter(recorder("b", FilterResult::Deny, &trail));
    channel.add_filter(recorder("c", FilterResult::Pass, &trail));

    let decision = channel.send(&event())?;

    assert!(decision == Decision::Reject);
    assert!(*trail.lock().unwrap() == ["a", "b"]);
    assert!(logs.is_empty());

    Ok(())
}

#[test]
fn test_empty_chain_accepts() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("open").build(capture)?;

    assert!(channel.send(&event())? == Decision::Accept);
    assert!(logs.len() == 1);

    Ok(())
}

#[test]
fn test_all_neutral_accepts() -> TestResult {
    let trail = Trail::default();
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("indifferent").build(capture)?;

    for name in ["x", "y"].iter() {
        channel.add_filter(recorder(*name, FilterResult::Neutral, &trail));
    }

    assert!(channel.send(&event())? == Decision::Accept);
    assert!(logs.len() == 1);

    Ok(())
}

#[test]
fn test_pass_filter_passes_everything() {
    let events = [
        Event::new(Level::TRACE, ""),
        Event::new(Level::ERROR, "boom").with_field("code", 500),
        Event::new(Level::DEBUG, "noise").with_target("deep::module"),
    ];

    for event in events.iter() {
        assert!(PassFilter.test(event) == FilterResult::Pass);
        assert!(DenyFilter.test(event) == FilterResult::Deny);
    }
}

#[test]
fn test_pass_filter_short_circuits() -> TestResult {
    let trail = Trail::default();
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("passing").build(capture)?;

    channel.add_filter(PassFilter);
    channel.add_filter(recorder("later", FilterResult::Deny, &trail));

    for _ in 0..3 {
        assert!(channel.send(&event())? == Decision::Accept);
    }

    assert!(trail.lock().unwrap().is_empty());
    assert!(logs.len() == 3);

    Ok(())
}

#[test]
fn test_stateful_filter() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("sampled")
        .format_with(|event: &Event| event.message().unwrap_or_default().to_owned())
        .build(capture)?;

    // keep every other event
    let seen = AtomicUsize::new(0);
    channel.add_filter(filter_fn(move |_: &Event| {
        if seen.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            FilterResult::Neutral
        } else {
            FilterResult::Deny
        }
    }));

    for message in ["0", "1", "2", "3", "4"].iter() {
        channel.send(&Event::new(Level::INFO, *message))?;
    }

    assert!(logs.lines() == ["0", "2", "4"]);

    Ok(())
}

#[test]
fn test_filter_sees_event_contents() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("by-field").build(capture)?;

    channel.add_filter(filter_fn(|event: &Event| {
        let internal = event
            .fields()
            .iter()
            .any(|field| field.key() == "internal" && field.value() == "true");
        if internal {
            FilterResult::Deny
        } else {
            FilterResult::Neutral
        }
    }));

    channel.send(&event().with_field("internal", true))?;
    channel.send(&event().with_field("internal", false))?;

    assert!(logs.len() == 1);

    Ok(())
}

#[test]
fn test_admits_does_not_deliver() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("dry-run").build(capture)?;
    channel.add_filter(DenyFilter);

    assert!(!channel.admits(&event()));
    channel.clear_filters();
    assert!(channel.admits(&event()));
    assert!(logs.is_empty());

    Ok(())
}
