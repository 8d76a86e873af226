//! Observer channels for weaving progress.
//!
//! The engine communicates progress through two optional single-string sinks,
//! one per verbosity level, handed in explicitly by the caller. There is no
//! ambient logger: tests capture exactly the lines a pass would emit without
//! any global state, and a caller that supplies no observers pays nothing for
//! message formatting.

/// Up to two observer callbacks for one engine invocation.
///
/// Both channels are side-channel observers only; they never affect control
/// flow or the outcome of the pass.
///
/// - `on_debug` receives one line per mutation (method conversion, type
///   conversion, instruction replacement).
/// - `on_info` receives one completion line per transformed type.
///
/// # Example
///
/// ```rust
/// use cilweave::prelude::*;
///
/// let mut lines = Vec::new();
/// let observers = WeaveObservers::new()
///     .on_debug(|line| lines.push(line.to_string()))
///     .on_info(|line| println!("{line}"));
///
/// let mut module = Module::new("App.exe");
/// Weaver::default().run(&mut module, observers)?;
/// assert!(lines.is_empty());
/// # Ok::<(), cilweave::Error>(())
/// ```
#[derive(Default)]
pub struct WeaveObservers<'a> {
    on_debug: Option<Box<dyn FnMut(&str) + 'a>>,
    on_info: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> WeaveObservers<'a> {
    /// Creates a pair of empty observer channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the fine-grained per-mutation channel.
    #[must_use]
    pub fn on_debug(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.on_debug = Some(Box::new(sink));
        self
    }

    /// Attaches the coarse per-type completion channel.
    #[must_use]
    pub fn on_info(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.on_info = Some(Box::new(sink));
        self
    }

    /// Emits a debug line. The message is only rendered when a sink is attached.
    pub(crate) fn debug(&mut self, line: impl FnOnce() -> String) {
        if let Some(sink) = self.on_debug.as_mut() {
            sink(&line());
        }
    }

    /// Emits an info line. The message is only rendered when a sink is attached.
    pub(crate) fn info(&mut self, line: impl FnOnce() -> String) {
        if let Some(sink) = self.on_info.as_mut() {
            sink(&line());
        }
    }
}

impl std::fmt::Debug for WeaveObservers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaveObservers")
            .field("on_debug", &self.on_debug.is_some())
            .field("on_info", &self.on_info.is_some())
            .finish()
    }
}
