use log_channel::filter::{Decision, PassFilter};
use log_channel::formatter::{BasicFormatter, FormatError, Formatter, FormatterSource};
use log_channel::transport::{Capture, Discard, Transport, Writer, WriterOptions};
use log_channel::{Channel, Error, Event};
use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

// Formatter errors are `Send + Sync` boxes, so the tests return the same.
type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Default)]
struct Recorded {
    options: Vec<String>,
    closes: usize,
}

#[derive(Debug, Default)]
struct Recording {
    state: Arc<Mutex<Recorded>>,
}

impl Transport for Recording {
    type Options = String;

    fn config(&mut self, options: String) {
        self.state.lock().unwrap().options.push(options);
    }

    fn close(&mut self) {
        self.state.lock().unwrap().closes += 1;
    }
}

struct Broken;

impl Formatter for Broken {
    fn format(&self, _event: &Event) -> Result<String, FormatError> {
        Err("cannot render".into())
    }
}

struct Unplugged;

impl Transport for Unplugged {
    type Options = ();

    fn deliver(&mut self, _rendered: String) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Unflushable;

impl io::Write for Unflushable {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }
}

// Records the message of every event it sees.
#[derive(Clone, Default)]
struct Messages(Arc<Mutex<Vec<String>>>);

impl Visit for Messages {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.lock().unwrap().push(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for Messages {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        event.record(&mut self.clone());
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_blank_names_are_rejected() {
    for name in ["", "   ", "\t\n"].iter() {
        let result = Channel::new(*name, None, Discard, ());
        assert!(matches!(
            result,
            Err(Error::InvalidArgument {
                argument: "name",
                ..
            })
        ));
    }
}

#[test]
fn test_name_is_kept_as_given() -> TestResult {
    let channel = Channel::new(" padded ", None, Discard, ())?;
    assert!(channel.name() == " padded ");
    Ok(())
}

#[test]
fn test_default_formatter_is_basic() -> TestResult {
    let channel = Channel::new("default", None, Discard, ())?;
    let event = Event::new(Level::WARN, "low battery").with_field("percent", 4);

    assert!(channel.formatter().format(&event)? == BasicFormatter::new().format(&event)?);

    Ok(())
}

#[test]
fn test_function_is_wrapped() -> TestResult {
    let render = |event: &Event| format!("{}|{}", event.level(), event.message().unwrap_or("-"));
    let channel = Channel::new("fn", Some(FormatterSource::function(render)), Discard, ())?;

    for event in [
        Event::new(Level::INFO, "a"),
        Event::new(Level::ERROR, "b").with_target("x"),
    ]
    .iter()
    {
        assert!(channel.formatter().format(event)? == render(event));
    }

    Ok(())
}

#[test]
fn test_formatter_is_used_as_is() -> TestResult {
    let mut channel = Channel::new("broken", Some(FormatterSource::formatter(Broken)), Discard, ())?;

    let err = channel.send(&Event::new(Level::INFO, "x")).unwrap_err();
    assert!(matches!(err, Error::Format { ref channel, .. } if channel == "broken"));
    assert!(std::error::Error::source(&err).unwrap().to_string() == "cannot render");

    Ok(())
}

#[test]
fn test_options_reach_config_once() -> TestResult {
    let transport = Recording::default();
    let state = Arc::clone(&transport.state);

    let mut channel = Channel::new("recorded", None, transport, "path=/var/log/app".to_owned())?;
    channel.send(&Event::new(Level::INFO, "x"))?;

    assert!(state.lock().unwrap().options == vec!["path=/var/log/app".to_owned()]);

    Ok(())
}

#[test]
fn test_close_is_idempotent() -> TestResult {
    let transport = Recording::default();
    let state = Arc::clone(&transport.state);

    let mut channel = Channel::new("closing", None, transport, String::new())?;
    assert!(!channel.is_closed());

    channel.close();
    channel.close();
    assert!(channel.is_closed());
    drop(channel);

    assert!(state.lock().unwrap().closes == 1);

    Ok(())
}

#[test]
fn test_drop_closes() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();

    drop(Channel::builder("dropped").build(capture)?);

    assert!(logs.is_closed());

    Ok(())
}

#[test]
fn test_send_after_close_fails() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();
    let mut channel = Channel::builder("closed").build(capture)?;

    channel.close();
    let err = channel.send(&Event::new(Level::INFO, "late")).unwrap_err();

    assert!(matches!(err, Error::Closed { ref channel } if channel == "closed"));
    assert!(logs.is_empty());

    Ok(())
}

#[test]
fn test_discard_is_a_null_object() -> TestResult {
    let mut channel = Channel::new("null", None, Discard, ())?;
    let decision = channel.send(&Event::new(Level::INFO, "nowhere"))?;

    assert!(decision == Decision::Accept);
    channel.close();

    Ok(())
}

#[test]
fn test_transport_errors_surface() -> TestResult {
    let mut channel = Channel::builder("unplugged").build(Unplugged)?;

    let err = channel.send(&Event::new(Level::INFO, "x")).unwrap_err();
    match err {
        Error::Transport { channel, source } => {
            assert!(channel == "unplugged");
            assert!(source.to_string() == "disk full");
        }
        other => panic!("unexpected error: {}", other),
    }

    Ok(())
}

#[test]
fn test_builder_keeps_filters_and_formatter() -> TestResult {
    let capture = Capture::new();
    let logs = capture.handle();

    let mut channel = Channel::builder("built")
        .format_with(|event: &Event| event.message().unwrap_or_default().to_uppercase())
        .filter(PassFilter)
        .build(capture)?;

    assert!(channel.filters().len() == 1);
    channel.send(&Event::new(Level::INFO, "shout"))?;
    assert!(logs.lines() == vec!["SHOUT".to_owned()]);

    Ok(())
}

#[test]
fn test_builder_rejects_blank_name() {
    let result = Channel::builder(" ").build(Discard);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_writer_appends_newline_by_default() -> TestResult {
    let buffer = SharedBuffer::default();
    let make_writer = {
        let buffer = buffer.clone();
        move || buffer.clone()
    };

    let mut channel = Channel::builder("writer")
        .format_with(|event: &Event| event.message().unwrap_or_default().to_owned())
        .build(Writer::new(make_writer))?;

    channel.send(&Event::new(Level::INFO, "one"))?;
    channel.send(&Event::new(Level::INFO, "two"))?;

    assert!(buffer.contents() == "one\ntwo\n");

    Ok(())
}

#[test]
fn test_writer_options_disable_newline() -> TestResult {
    let buffer = SharedBuffer::default();
    let make_writer = {
        let buffer = buffer.clone();
        move || buffer.clone()
    };

    let mut channel = Channel::builder("writer")
        .format_with(|event: &Event| event.message().unwrap_or_default().to_owned())
        .build_with(Writer::new(make_writer), WriterOptions { newline: false })?;

    channel.send(&Event::new(Level::INFO, "one"))?;
    channel.send(&Event::new(Level::INFO, "two"))?;

    assert!(buffer.contents() == "onetwo");

    Ok(())
}

#[test]
fn test_writer_options_from_json() -> TestResult {
    let defaulted: WriterOptions = serde_json::from_str("{}")?;
    assert!(defaulted == WriterOptions::default());
    assert!(defaulted.newline);

    let explicit: WriterOptions = serde_json::from_str(r#"{ "newline": false }"#)?;
    assert!(!explicit.newline);

    Ok(())
}

#[test]
fn test_sender_transport() -> TestResult {
    let (tx, rx) = mpsc::channel::<String>();
    let mut channel = Channel::builder("forward")
        .format_with(|event: &Event| event.message().unwrap_or_default().to_owned())
        .build(tx)?;

    channel.send(&Event::new(Level::INFO, "across"))?;
    assert!(rx.recv()? == "across");

    drop(rx);
    let err = channel.send(&Event::new(Level::INFO, "nobody")).unwrap_err();
    match err {
        Error::Transport { source, .. } => assert!(source.kind() == io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {}", other),
    }

    Ok(())
}

#[test]
fn test_writer_close_reports_flush_failure() -> TestResult {
    let messages = Messages::default();
    let subscriber = Registry::default().with(messages.clone());

    tracing::subscriber::with_default(subscriber, || -> TestResult {
        let mut channel = Channel::builder("unflushable").build(Writer::new(|| Unflushable))?;
        channel.send(&Event::new(Level::INFO, "written"))?;
        channel.close();
        assert!(channel.is_closed());
        Ok(())
    })?;

    let messages = messages.0.lock().unwrap();
    assert!(messages.iter().any(|message| message == "failed to flush writer on close"));

    Ok(())
}
