use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Write};
use std::io::stdout;
use std::num::NonZeroU64;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use thread_local::ThreadLocal;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber, span};
use tracing::span::Id;
use tracing_core::Interest;

///
/// Decides which diagnostics are shown, based on their channel and level.
///
/// A channel is the `tracing` target of a span or event, e.g. `factorized_poly::cache`.
/// Channels are organized hierarchically, with `::` separating the levels, so
/// `factorized_poly` is the parent of `factorized_poly::cache`. A rule maps a channel
/// to the most verbose level that is still shown, or to `None` if the channel should
/// be silent. If there is no rule for some channel, the rule of its parent applies,
/// and the empty channel always has a rule.
///
/// # Example
/// ```
/// # use factorized_poly::tracing::*;
/// # use tracing::Level;
/// let filter = LogFilter::new(Some(Level::WARN))
///     .with_rule("factorized_poly", Some(Level::INFO))
///     .with_rule("factorized_poly::cache", Some(Level::TRACE));
/// assert!(filter.is_enabled("factorized_poly::cache::reclaim", &Level::DEBUG));
/// assert!(!filter.is_enabled("factorized_poly::algorithms", &Level::DEBUG));
/// assert!(filter.is_enabled("other_crate", &Level::WARN));
/// ```
///
#[derive(Clone, Debug)]
pub struct LogFilter {
    rules: BTreeMap<String, Option<Level>>
}

impl LogFilter {

    pub fn new(default_level: Option<Level>) -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(String::new(), default_level);
        Self { rules }
    }

    pub fn with_rule(mut self, channel: &str, level: Option<Level>) -> Self {
        self.rules.insert(channel.to_owned(), level);
        self
    }

    fn level_for<'a>(&'a self, mut channel: &str) -> Option<&'a Level> {
        loop {
            if let Some(rule) = self.rules.get(channel) {
                return rule.as_ref();
            }
            channel = match channel.rfind("::") {
                Some(index) => &channel[..index],
                None => ""
            };
        }
    }

    pub fn is_enabled(&self, channel: &str, level: &Level) -> bool {
        self.level_for(channel).map(|max_level| level <= max_level).unwrap_or(false)
    }
}

struct SpanState {
    /// how many handles to the span currently exist; used for reference counting,
    /// to remove the span from map of spans when it is no longer used
    reference_counter: AtomicUsize,
    /// name of the span together with its recorded fields
    description: String,
    metadata: &'static Metadata<'static>,
    /// when the span was last entered, in microseconds since the creation of the subscriber
    entered_timestamp: AtomicU64
}

///
/// A [`tracing::Subscriber`] that prints spans and events that pass a [`LogFilter`]
/// to stdout, indented by the nesting depth of the currently entered spans.
///
/// As in [`crate::computation::LogProgress`], we use `print!` instead of writing to
/// `Stdout` directly, since this works with output capture in tests.
///
pub struct LogAlgorithmSubscriber {
    span_ids: AtomicU64,
    span_map: RwLock<HashMap<Id, SpanState>>,
    entered_spans: ThreadLocal<RefCell<Vec<Id>>>,
    default_instant: Instant,
    filter: LogFilter
}

impl LogAlgorithmSubscriber {

    pub fn new(filter: LogFilter) -> Self {
        Self {
            span_ids: AtomicU64::new(1),
            span_map: RwLock::new(HashMap::new()),
            entered_spans: ThreadLocal::new(),
            default_instant: Instant::now(),
            filter: filter
        }
    }

    ///
    /// Installs the subscriber as global default. Panics if a global default
    /// subscriber has already been set.
    ///
    pub fn init(filter: LogFilter) {
        tracing::subscriber::set_global_default(Self::new(filter)).unwrap()
    }

    ///
    /// Installs a subscriber that only shows messages on level `INFO`, unless some
    /// subscriber has already been installed. Meant to be called at the start of tests.
    ///
    pub fn init_test() {
        _ = tracing::subscriber::set_global_default(Self::new(
            LogFilter::new(Some(Level::INFO))
        ))
    }

    fn span_map<'a>(&'a self) -> RwLockReadGuard<'a, HashMap<Id, SpanState>> {
        self.span_map.read().unwrap()
    }

    fn span_map_mut<'a>(&'a self) -> RwLockWriteGuard<'a, HashMap<Id, SpanState>> {
        self.span_map.write().unwrap()
    }

    fn entered_spans(&self) -> &RefCell<Vec<Id>> {
        self.entered_spans.get_or(|| RefCell::new(Vec::new()))
    }

    fn elapsed_micros(&self) -> u64 {
        Instant::now().duration_since(self.default_instant).as_micros() as u64
    }

    fn print_line(&self, depth: usize, line: impl Display) {
        println!("{:indent$}{}", "", line, indent = 2 * depth);
        _ = std::io::Write::flush(&mut stdout());
    }
}

struct FieldRecorder {
    message: Option<String>,
    fields: Option<String>
}

impl FieldRecorder {

    fn new() -> Self {
        Self { message: None, fields: None }
    }
}

impl Display for FieldRecorder {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(message) = &self.message {
            write!(f, "{}", message)?;
        }
        if let Some(fields) = &self.fields {
            write!(f, "({})", fields)?;
        }
        Ok(())
    }
}

impl Visit for FieldRecorder {

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else if let Some(fields) = &mut self.fields {
            _ = write!(fields, ", {}={:?}", field.name(), value);
        } else {
            self.fields = Some(format!("{}={:?}", field.name(), value));
        }
    }
}

impl Subscriber for LogAlgorithmSubscriber {

    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if self.enabled(metadata) {
            Interest::always()
        } else {
            Interest::never()
        }
    }

    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.filter.is_enabled(metadata.target(), metadata.level())
    }

    fn current_span(&self) -> tracing_core::span::Current {
        let entered = self.entered_spans().borrow();
        match entered.last() {
            Some(id) => tracing_core::span::Current::new(id.clone(), self.span_map().get(id).unwrap().metadata),
            None => tracing_core::span::Current::none()
        }
    }

    fn new_span(&self, span: &span::Attributes<'_>) -> Id {
        let id = Id::from_non_zero_u64(NonZeroU64::try_from(self.span_ids.fetch_add(1, Ordering::Relaxed)).unwrap());
        let mut description = FieldRecorder::new();
        span.record(&mut description);
        description.message = Some(span.metadata().name().to_owned());
        let previous = self.span_map_mut().insert(id.clone(), SpanState {
            reference_counter: AtomicUsize::new(1),
            description: description.to_string(),
            metadata: span.metadata(),
            entered_timestamp: AtomicU64::new(0)
        });
        assert!(previous.is_none());
        return id;
    }

    fn record(&self, _span: &Id, _values: &span::Record<'_>) {
        // fields recorded after span creation are not shown
    }

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {
        // we only care about the nesting of spans
    }

    fn event(&self, event: &Event<'_>) {
        let mut description = FieldRecorder::new();
        event.record(&mut description);
        let depth = self.entered_spans().borrow().len();
        let metadata = event.metadata();
        self.print_line(depth, format_args!("[{}us] {} {}: {}", self.elapsed_micros(), metadata.level(), metadata.target(), description));
    }

    fn enter(&self, span: &Id) {
        let depth = self.entered_spans().borrow().len();
        {
            let span_map = self.span_map();
            let entered_span = span_map.get(span).unwrap();
            entered_span.entered_timestamp.store(self.elapsed_micros(), Ordering::SeqCst);
            self.print_line(depth, format_args!("{} {}", entered_span.metadata.target(), entered_span.description));
        }
        self.entered_spans().borrow_mut().push(span.clone());
    }

    fn exit(&self, span: &Id) {
        let mut entered = self.entered_spans().borrow_mut();
        if let Some(index) = entered.iter().rposition(|id| id == span) {
            entered.truncate(index);
        }
        let depth = entered.len();
        drop(entered);
        let span_map = self.span_map();
        let exited_span = span_map.get(span).unwrap();
        let time = self.elapsed_micros() - exited_span.entered_timestamp.swap(0, Ordering::SeqCst);
        self.print_line(depth, format_args!("done({}us)", time));
    }

    fn clone_span(&self, id: &Id) -> Id {
        _ = self.span_map().get(id).unwrap().reference_counter.fetch_add(1, Ordering::Relaxed);
        return id.clone();
    }

    fn try_close(&self, id: Id) -> bool {
        let remaining_handles = self.span_map().get(&id).unwrap().reference_counter.fetch_sub(1, Ordering::Relaxed) - 1;
        if remaining_handles == 0 {
            _ = self.span_map_mut().remove(&id).unwrap();
            true
        } else {
            false
        }
    }
}

#[test]
fn test_log_filter_inherits_parent_rule() {
    let filter = LogFilter::new(None)
        .with_rule("factorized_poly", Some(Level::DEBUG))
        .with_rule("factorized_poly::cache", None);
    assert!(!filter.is_enabled("", &Level::ERROR));
    assert!(!filter.is_enabled("other", &Level::ERROR));
    assert!(filter.is_enabled("factorized_poly", &Level::DEBUG));
    assert!(!filter.is_enabled("factorized_poly", &Level::TRACE));
    assert!(filter.is_enabled("factorized_poly::algorithms::eea", &Level::INFO));
    assert!(!filter.is_enabled("factorized_poly::cache", &Level::ERROR));
    assert!(!filter.is_enabled("factorized_poly::cache::slots", &Level::ERROR));
    assert!(filter.is_enabled("factorized_poly::cached", &Level::DEBUG));
}

#[test]
fn test_subscriber_tracks_entered_spans() {
    let subscriber = LogAlgorithmSubscriber::new(LogFilter::new(Some(Level::TRACE)));
    tracing::subscriber::with_default(subscriber, || {
        let outer = tracing::span!(Level::DEBUG, "outer", degree = 3);
        let _outer_guard = outer.enter();
        let inner = tracing::span!(Level::TRACE, "inner");
        {
            let _inner_guard = inner.enter();
            tracing::event!(Level::DEBUG, value = 1, "inside");
            assert_eq!(Some("inner"), tracing::Span::current().metadata().map(|m| m.name()));
        }
        assert_eq!(Some("outer"), tracing::Span::current().metadata().map(|m| m.name()));
    });
}
