use std::fmt::Arguments;
use std::io::Write;

///
/// Observer of a long-running computation, passed explicitly to the algorithms that
/// report their progress (e.g. [`crate::rings::poly::UnivariatePolynomial::factorization_with_controller()`]).
///
/// The messages are short markers, not full sentences: a `.` for every completed step,
/// some `(name=value)` groups for intermediate sizes. Implementations decide whether
/// and where they are shown.
///
pub trait ComputationController: Clone {

    fn log(&self, args: Arguments);
}

///
/// Logs a progress message to the given [`ComputationController`], with the same syntax
/// as `print!()`.
///
#[macro_export]
macro_rules! log_progress {
    ($controller:expr, $($args:tt)*) => {
        ($controller).log(std::format_args!($($args)*))
    };
}

///
/// A [`ComputationController`] that prints all progress messages to stdout.
///
/// We use `print!` instead of writing to `Stdout` directly, since this works with
/// output capture in tests.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ComputationController for LogProgress {

    fn log(&self, args: Arguments) {
        print!("{}", args);
        _ = std::io::stdout().flush();
    }
}

///
/// A [`ComputationController`] that discards all progress messages.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct DontObserve;

impl ComputationController for DontObserve {

    fn log(&self, _args: Arguments) {}
}

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordProgress {
    pub(crate) messages: Rc<RefCell<String>>
}

#[cfg(test)]
impl ComputationController for RecordProgress {

    fn log(&self, args: Arguments) {
        std::fmt::Write::write_fmt(&mut *self.messages.borrow_mut(), args).unwrap();
    }
}

#[test]
fn test_log_progress_macro() {
    let controller = RecordProgress::default();
    log_progress!(controller, "(deg={})", 5);
    log_progress!(controller, ".");
    assert_eq!("(deg=5).", controller.messages.borrow().as_str());
    log_progress!(DontObserve, "{}", 1);
}
