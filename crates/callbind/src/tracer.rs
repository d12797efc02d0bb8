//! Argument binding tracing infrastructure.
//!
//! Provides a trait-based tracing system for the binder with zero-cost abstraction.
//! When using [`NoopTracer`], all trace methods compile away entirely via monomorphization.
//!
//! # Architecture
//!
//! The [`BindTracer`] trait defines hook points at each binding decision (which source
//! filled a parameter, what the variadic sinks collected, why binding failed).
//! Concrete implementations collect different kinds of data:
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default for [`Signature::bind`](crate::Signature::bind)) |
//! | [`StderrTracer`] | Human-readable binding log to stderr |
//! | [`RecordingTracer`] | Full event recording for assertions or post-mortem |
//!
//! # Usage
//!
//! ```
//! use callbind::{ArgValues, RecordingTracer, Signature, TraceEvent};
//!
//! let sig = Signature::builder().arg("a").arg_with_default("b", "text").build().unwrap();
//! let mut tracer = RecordingTracer::new();
//! sig.bind_traced("f", ArgValues::positional([1]), &mut tracer).unwrap();
//! assert_eq!(
//!     tracer.events()[2],
//!     TraceEvent::Default { param: "b".to_owned() }
//! );
//! ```

use crate::exception::{BindError, BindErrorKind};

/// Trace event emitted while binding a call.
///
/// Used by [`RecordingTracer`] to capture a full binding trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// Binding of a call started.
    Bind {
        func_name: String,
        /// Number of positional values at the call site.
        positional: usize,
        /// Number of keyword values at the call site.
        keywords: usize,
    },
    /// A parameter took the next positional value.
    Positional { param: String },
    /// A parameter took the same-named keyword value.
    Keyword { param: String },
    /// A parameter fell back to its default.
    Default { param: String },
    /// The `*args` parameter collected `count` surplus positionals.
    VarArgs { param: String, count: usize },
    /// The `**kwargs` parameter collected `count` unmatched keywords.
    VarKwargs { param: String, count: usize },
    /// Binding failed.
    Error { kind: BindErrorKind, message: String },
}

/// Trait for binding tracing.
///
/// All methods have default no-op implementations, so [`NoopTracer`] requires
/// zero lines of code and compiles to zero instructions. Implementations only
/// override the hooks they care about.
pub trait BindTracer: std::fmt::Debug {
    /// Called once before binding starts.
    ///
    /// # Arguments
    /// * `func_name` - Name of the function being called
    /// * `positional` - Number of positional values at the call site
    /// * `keywords` - Number of keyword values at the call site
    #[inline(always)]
    fn on_bind(&mut self, _func_name: &str, _positional: usize, _keywords: usize) {}

    /// Called when a named parameter is filled from a positional value.
    #[inline(always)]
    fn on_positional(&mut self, _param: &str) {}

    /// Called when a named parameter is filled from a keyword value.
    #[inline(always)]
    fn on_keyword(&mut self, _param: &str) {}

    /// Called when a named parameter falls back to its default.
    #[inline(always)]
    fn on_default(&mut self, _param: &str) {}

    /// Called when the `*args` parameter is filled.
    ///
    /// # Arguments
    /// * `param` - Name of the `*args` parameter
    /// * `count` - Number of surplus positional values collected (may be 0)
    #[inline(always)]
    fn on_var_args(&mut self, _param: &str, _count: usize) {}

    /// Called when the `**kwargs` parameter is filled.
    ///
    /// # Arguments
    /// * `param` - Name of the `**kwargs` parameter
    /// * `count` - Number of unmatched keyword values collected (may be 0)
    #[inline(always)]
    fn on_var_kwargs(&mut self, _param: &str, _count: usize) {}

    /// Called once when binding fails, after which no other hook fires for the call.
    #[inline(always)]
    fn on_error(&mut self, _err: &BindError) {}
}

// ============================================================================
// NoopTracer: zero-cost default
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl BindTracer for NoopTracer {}

// ============================================================================
// StderrTracer: human-readable binding log
// ============================================================================

/// Tracer that prints a human-readable binding log to stderr.
///
/// Output format:
/// ```text
/// >>> BIND example_func  positional=1  keywords=0
///     a <- positional
///     b <- default
/// >>> BIND example_func  positional=0  keywords=0
/// !!! MissingArgument: example_func() missing 1 required positional argument: 'a'
/// ```
#[derive(Debug, Clone, Default)]
pub struct StderrTracer {
    calls: usize,
}

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls traced so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl BindTracer for StderrTracer {
    fn on_bind(&mut self, func_name: &str, positional: usize, keywords: usize) {
        self.calls += 1;
        eprintln!(">>> BIND {func_name}  positional={positional}  keywords={keywords}");
    }

    fn on_positional(&mut self, param: &str) {
        eprintln!("    {param} <- positional");
    }

    fn on_keyword(&mut self, param: &str) {
        eprintln!("    {param} <- keyword");
    }

    fn on_default(&mut self, param: &str) {
        eprintln!("    {param} <- default");
    }

    fn on_var_args(&mut self, param: &str, count: usize) {
        eprintln!("    *{param} <- {count} surplus positional");
    }

    fn on_var_kwargs(&mut self, param: &str, count: usize) {
        eprintln!("    **{param} <- {count} unmatched keyword");
    }

    fn on_error(&mut self, err: &BindError) {
        eprintln!("!!! {}: {err}", err.kind());
    }
}

// ============================================================================
// RecordingTracer: full event capture
// ============================================================================

/// Tracer that records every binding event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BindTracer for RecordingTracer {
    fn on_bind(&mut self, func_name: &str, positional: usize, keywords: usize) {
        self.events.push(TraceEvent::Bind {
            func_name: func_name.to_owned(),
            positional,
            keywords,
        });
    }

    fn on_positional(&mut self, param: &str) {
        self.events.push(TraceEvent::Positional { param: param.to_owned() });
    }

    fn on_keyword(&mut self, param: &str) {
        self.events.push(TraceEvent::Keyword { param: param.to_owned() });
    }

    fn on_default(&mut self, param: &str) {
        self.events.push(TraceEvent::Default { param: param.to_owned() });
    }

    fn on_var_args(&mut self, param: &str, count: usize) {
        self.events.push(TraceEvent::VarArgs {
            param: param.to_owned(),
            count,
        });
    }

    fn on_var_kwargs(&mut self, param: &str, count: usize) {
        self.events.push(TraceEvent::VarKwargs {
            param: param.to_owned(),
            count,
        });
    }

    fn on_error(&mut self, err: &BindError) {
        self.events.push(TraceEvent::Error {
            kind: err.kind(),
            message: err.to_string(),
        });
    }
}
