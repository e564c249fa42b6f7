use crate::event::Event;

/// Selects which events produce a structured trace record in addition to
/// updating a logger's counters.
///
/// The four criteria compose disjunctively: a record is emitted as soon as
/// any enabled criterion matches. Terminate and timeout records bypass the
/// predicate entirely.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trace {
    /// Emit a record for every strengthen event.
    ///
    /// Defaults to `false`.
    pub strengthen: bool,
    /// Emit a record every `n`-th event. `Some(0)` is treated as disabled.
    ///
    /// Defaults to `None`.
    pub every: Option<u64>,
    /// Emit a record whenever the stack depth equals this value.
    ///
    /// Defaults to `None`.
    pub depth: Option<usize>,
    /// Emit a record whenever the stack depth is at most this value.
    ///
    /// Defaults to `None`.
    pub max_depth: Option<usize>,
}

impl Trace {
    /// Pure predicate over an event, the total number of events observed so
    /// far (including this one) and the stack depth at emission time.
    pub fn fires(&self, event: Event, events: u64, depth: usize) -> bool {
        if self.strengthen && event == Event::Strengthen {
            return true;
        }
        if let Some(every) = self.every.filter(|&every| every > 0) {
            if events % every == 0 {
                return true;
            }
        }
        if self.depth == Some(depth) {
            return true;
        }
        matches!(self.max_depth, Some(max) if depth <= max)
    }

    /// Builds a predicate from `-strengthen`, `-evts=N`, `-stackdepth=D` and
    /// `-maxstackdepth=D` arguments. Anything else, including malformed
    /// numbers, is ignored.
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut trace = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if arg == "-strengthen" {
                trace.strengthen = true;
            } else if let Some(value) = arg.strip_prefix("-evts=") {
                trace.every = value.parse().ok();
            } else if let Some(value) = arg.strip_prefix("-stackdepth=") {
                trace.depth = value.parse().ok();
            } else if let Some(value) = arg.strip_prefix("-maxstackdepth=") {
                trace.max_depth = value.parse().ok();
            }
        }
        trace
    }
}

/// Full option surface of a search driver, parsed from raw arguments.
///
/// The first argument that does not start with `-` is taken as the problem
/// file; unrecognized options are silently ignored and absent numeric
/// options stay disabled.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// First positional argument: the problem file.
    pub file: Option<String>,
    /// `-timeout=N`: iteration cap.
    pub iterations: Option<u64>,
    /// `-timeoutMillis=N`: wall-clock cap, in milliseconds.
    pub millis: Option<u64>,
    /// `-countlogger`: observe the search with a
    /// [`Tally`](crate::tally::Tally) logger.
    pub count: bool,
    /// `-histlogger`: observe the search with a
    /// [`Histogram`](crate::histogram::Histogram) logger.
    pub histogram: bool,
    /// Trace criteria shared by both concrete loggers.
    pub trace: Trace,
}

impl Options {
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_string()).collect();
        let mut options = Self {
            trace: Trace::parse(&args),
            ..Self::default()
        };
        for arg in &args {
            if let Some(value) = arg.strip_prefix("-timeout=") {
                options.iterations = value.parse().ok();
            } else if let Some(value) = arg.strip_prefix("-timeoutMillis=") {
                options.millis = value.parse().ok();
            } else if arg == "-countlogger" {
                options.count = true;
            } else if arg == "-histlogger" {
                options.histogram = true;
            } else if options.file.is_none() && !arg.starts_with('-') {
                options.file = Some(arg.clone());
            }
        }
        options
    }
}
