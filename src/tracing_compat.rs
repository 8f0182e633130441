//! Logging shim.
//!
//! With the `tracing-integration` feature the macros forward to `tracing`.
//! Without it they expand to nothing, so call sites never need their own
//! `cfg` attributes.

#[cfg(feature = "tracing-integration")]
pub(crate) use tracing::{debug, trace, warn};

// Defined under distinct names: a local `macro_rules! warn` re-exported as
// `warn` is ambiguous with the built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {noop_debug, noop_trace, noop_warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use noop::{noop_debug as debug, noop_trace as trace, noop_warn as warn};
