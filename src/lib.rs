#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod accumulate;
pub mod counted;
pub mod event;
pub mod generator;
pub mod histogram;
pub mod logger;
pub mod partition;
pub mod quiet;
pub mod search;
pub mod tally;
pub mod trace;

pub use accumulate::Accumulate;
pub use counted::Counted;
pub use event::Event;
pub use generator::Generator;
pub use histogram::Histogram;
pub use logger::{Frontier, Logger, Timeout};
pub use quiet::Quiet;
pub use search::{Search, Verdict};
pub use tally::Tally;
pub use trace::{Options, Trace};
