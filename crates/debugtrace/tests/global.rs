use debugtrace::{MemorySink, trace_enter, trace_message, trace_print};
use debugtrace_testing::assertions::assert_enter_leave_balanced;
use debugtrace_testing::fixtures::{fixed_clock, strip_timestamps};
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};
use std::thread;
use std::time::Duration;

// Every test here drives the one process-wide tracer.
static SERIAL: Mutex<()> = Mutex::new(());

fn isolate() -> (MutexGuard<'static, ()>, MemorySink) {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    let sink = MemorySink::new();
    debugtrace::set_sink(Box::new(sink.clone()));
    debugtrace::set_clock(Box::new(fixed_clock()));
    debugtrace::reset();
    (guard, sink)
}

fn payloads(sink: &MemorySink) -> Vec<String> {
    strip_timestamps(&sink.lines()).into_iter().skip(2).collect()
}

fn traced_add(a: i32, b: i32) -> i32 {
    trace_enter!();
    trace_print!(a);
    trace_print!("second", b);
    a + b
}

fn outer() {
    trace_enter!("outer");
    inner();
    trace_message!("after {}", "inner");
}

fn inner() {
    trace_enter!("inner");
}

#[test]
fn test_macros_trace_function() {
    let (_guard, sink) = isolate();

    assert_eq!(traced_add(1, 2), 3);

    let payloads = payloads(&sink);
    assert_eq!(payloads.len(), 4);
    assert!(
        payloads[0].starts_with("Enter global::traced_add (global.rs:"),
        "{}",
        payloads[0]
    );
    assert!(payloads[1].starts_with("| a = 1 (global.rs:"), "{}", payloads[1]);
    assert!(payloads[2].starts_with("| second = 2 (global.rs:"), "{}", payloads[2]);
    assert_eq!(payloads[3], "Leave global::traced_add (global.rs)");
}

#[test]
fn test_nested_functions() -> anyhow::Result<()> {
    let (_guard, sink) = isolate();

    outer();

    let payloads = payloads(&sink);
    assert_enter_leave_balanced(&payloads, "| ")?;
    let without_locations: Vec<&str> = payloads
        .iter()
        .map(|line| line.split(" (").next().unwrap_or(line))
        .collect();
    assert_eq!(
        without_locations,
        [
            "Enter outer",
            "| Enter inner",
            "| Leave inner",
            "| after inner",
            "Leave outer",
        ]
    );

    Ok(())
}

#[test]
fn test_leave_is_written_on_panic() -> anyhow::Result<()> {
    let (_guard, sink) = isolate();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _scope = debugtrace::enter("fails");
        panic!("expected failure");
    }));
    assert!(result.is_err());

    let payloads = payloads(&sink);
    assert_enter_leave_balanced(&payloads, "| ")?;
    assert_eq!(payloads.len(), 2);

    Ok(())
}

#[test]
fn test_configure_and_reset() {
    let (_guard, sink) = isolate();

    debugtrace::configure(|config| {
        config.varname_value_separator = " := ".to_string();
        config.collection_limit = 2;
    })
    .unwrap();
    assert_eq!(debugtrace::config().collection_limit, 2);

    let mut map = BTreeMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);
    debugtrace::print_at("map", &map, None);

    debugtrace::reset();
    assert_eq!(debugtrace::config(), debugtrace::Config::default());
    sink.clear();
    debugtrace::print_at("map", &map, None);

    insta::assert_snapshot!(payloads(&sink).join("\n"), @r#"map = (BTreeMap<&str, i32> size:3){(&str)"a": 1, (&str)"b": 2, (&str)"c": 3}"#);
}

#[test]
fn test_truncated_print() {
    let (_guard, sink) = isolate();
    debugtrace::configure(|config| config.collection_limit = 2).unwrap();

    debugtrace::print_at("ids", &[10u8, 20, 30], None);

    insta::assert_snapshot!(payloads(&sink).join("\n"), @r"
ids = ([u8; 3] size:3){
  (u8)10,
  (u8)20,
  ...
}
");
}

#[test]
fn test_code_page_is_validated() {
    let (_guard, _sink) = isolate();
    assert!(debugtrace::set_code_page(debugtrace::CP_US_ASCII).is_ok());
    assert!(debugtrace::set_code_page(437).is_err());
    assert_eq!(debugtrace::config().code_page, debugtrace::CP_US_ASCII);
    assert_eq!(debugtrace::dropped_lines(), 0);
}

struct Account(u32);

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let _scope = debugtrace::enter_at("Account::fmt", None);
        write!(f, "Account #{}", self.0)
    }
}

#[test]
fn test_print_value_whose_display_traces() {
    let (_guard, sink) = isolate();

    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        debugtrace::print_at("account", &debugtrace::display(&Account(7)), None);
        let _ = done.send(());
    });
    assert!(
        finished.recv_timeout(Duration::from_secs(5)).is_ok(),
        "print did not return"
    );

    assert_eq!(
        payloads(&sink),
        vec![
            "Enter Account::fmt",
            "Leave Account::fmt",
            "account = (Account)Account #7",
        ]
    );
}
