//! State descriptors for asynchronously validated machines.
//!
//! A [`State`] is a named node in a machine's topology. It carries an
//! optional allow-list of source states, an optional asynchronous entry
//! guard, and optional synchronous enter/exit hooks. Descriptors are
//! immutable once registered: hooks are attached at construction time and
//! never replaced.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Failure value produced by entry guards and lifecycle hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Asynchronous entry guard. Receives the name of the outgoing state and
/// must resolve `Ok(())` before the machine commits the transition.
pub type EnterGuard = Arc<dyn Fn(&str) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Synchronous lifecycle hook. An `Err` models a thrown side effect and
/// surfaces as a transition failure.
pub type Hook = Arc<dyn Fn() -> Result<(), BoxError> + Send + Sync>;

/// A named node in the machine's topology with optional entry/exit behavior.
///
/// States are built fluently:
///
/// ```rust
/// use stategate::State;
///
/// let on = State::new("on")
///     .allow_from(["off"])
///     .on_before_enter(|_prev: &str| async { Ok(()) })
///     .on_enter(|| {
///         println!("powered up");
///         Ok(())
///     });
///
/// assert_eq!(on.name(), "on");
/// assert!(on.allows_source("off"));
/// assert!(!on.allows_source("running"));
/// ```
///
/// An empty allow-list means the state is reachable from any other state:
///
/// ```rust
/// use stategate::State;
///
/// let red = State::new("red");
/// assert!(red.accepts_any_source());
/// assert!(red.allows_source("green"));
/// ```
#[derive(Clone)]
pub struct State {
    name: String,
    allowed_sources: Vec<String>,
    before_enter: Option<EnterGuard>,
    enter: Option<Hook>,
    exit: Option<Hook>,
}

impl State {
    /// Create a state with the given name and no sources, guard, or hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed_sources: Vec::new(),
            before_enter: None,
            enter: None,
            exit: None,
        }
    }

    /// Restrict entry into this state to the named source states.
    ///
    /// Calling this with an empty iterator leaves the state open to any
    /// source, which is also the default.
    pub fn allow_from<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Attach the asynchronous entry guard.
    ///
    /// The guard receives the outgoing state's name. It is the single
    /// suspension point of a transition: the machine awaits it after the
    /// reachability check and only commits the state swap once it
    /// resolves `Ok(())`.
    ///
    /// The returned future must be `'static`; a guard that keeps the
    /// previous state's name across an await point should own it first:
    ///
    /// ```rust
    /// use stategate::State;
    ///
    /// let running = State::new("running").on_before_enter(|prev: &str| {
    ///     let prev = prev.to_owned();
    ///     async move {
    ///         if prev == "on" {
    ///             Ok(())
    ///         } else {
    ///             Err(format!("cannot spin up from '{prev}'").into())
    ///         }
    ///     }
    /// });
    /// # let _ = running;
    /// ```
    pub fn on_before_enter<F, Fut>(mut self, guard: F) -> Self
    where
        F: Fn(&str) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.before_enter = Some(Arc::new(move |prev| guard(prev).boxed()));
        self
    }

    /// Attach the hook invoked immediately after this state becomes current.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(hook));
        self
    }

    /// Attach the hook invoked on this state immediately before it is replaced.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(hook));
        self
    }

    /// The state's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source states this state may be entered from.
    pub fn allowed_sources(&self) -> &[String] {
        &self.allowed_sources
    }

    /// Whether the state is open to entry from any source.
    pub fn accepts_any_source(&self) -> bool {
        self.allowed_sources.is_empty()
    }

    /// Whether entry from `source` is permitted by this state's allow-list.
    pub fn allows_source(&self, source: &str) -> bool {
        self.accepts_any_source() || self.allowed_sources.iter().any(|s| s == source)
    }

    pub(crate) fn entry_guard(&self) -> Option<EnterGuard> {
        self.before_enter.clone()
    }

    pub(crate) fn enter_hook(&self) -> Option<Hook> {
        self.enter.clone()
    }

    pub(crate) fn exit_hook(&self) -> Option<Hook> {
        self.exit.clone()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("allowed_sources", &self.allowed_sources)
            .field("before_enter", &self.before_enter.is_some())
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// States compare by name; names are unique within a machine.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for State {}
