#![forbid(unsafe_code)]

//! Two-way synchronization between a reactive cell and one query parameter.
//!
//! [`ParamAtomSynchronizer`] wires two one-directional edges:
//!
//! - **read edge** (URL → cell): whenever the raw value of the tracked
//!   parameter changes, decode it and write the result into the cell unless
//!   the cell already holds an equal value.
//! - **write edge** (cell → URL): whenever the cell changes, encode the new
//!   value and write it into the URL unless the parameter already holds that
//!   exact string.
//!
//! The edges share no state except the [`SyncPhase`] flag, which belongs to the
//! write edge. Mounting runs the read edge once against the current URL while
//! the phase is `Uninitialized`, so the cell is seeded from the URL (or from
//! `decode(None)`) and that seed is never echoed back into the URL. Once the
//! mount pass returns, the phase becomes `Active` and every later cell change
//! is eligible for a URL write.
//!
//! The seed's cell notification is not always delivered during `attach`: an
//! open [`BatchScope`](paramsync_reactive::BatchScope), or an attach issued
//! from inside the cell's own notification pass, holds it back. In that case
//! the phase stays `Uninitialized` after `attach` returns, and the first
//! notification the write edge receives consumes the transition to `Active`
//! instead of writing.
//!
//! # Invariants
//!
//! 1. After attach, the cell holds `decode(raw)` under the cell's equality.
//! 2. Mounting never writes the URL.
//! 3. An edge whose target already equals its proposal writes nothing, so a
//!    round trip through inverse converters settles after one write.
//! 4. After [`SyncHandle`] drops (or [`SyncHandle::detach`]), neither edge
//!    fires again.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty parameter name | Caller bug | `attach` returns [`SyncError::EmptyParamName`] |
//! | Converter panics | Caller's decode/encode | Unwinds to whoever triggered the change |
//! | Non-inverse converters | Caller's choice | Cell and URL may settle on disagreeing values |
//! | Converters allocate fresh values each call | Caller's equality | Edges may keep firing; pass an equality via [`cell_eq`](ParamAtomSynchronizer::cell_eq) |

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use paramsync_reactive::BindingScope;

use crate::cell::ReactiveCell;
use crate::codec::Codec;
use crate::config::{EmptyValue, SyncOptions};
use crate::error::SyncError;
use crate::settle::{Settle, param_settled};
use crate::store::ParamStore;

/// One-shot guard for the write edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    /// Mounting, or waiting for a held-back seed notification; cell
    /// notifications are the initial replay and are not written back.
    Uninitialized,
    /// Mounted; cell changes are written to the URL.
    Active,
}

/// Whether the seed's cell notification has reached the write edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seed {
    Attaching,
    Delivered,
    Deferred,
}

/// Builder for a cell/parameter synchronization.
///
/// ```
/// use paramsync::{Codec, ParamAtomSynchronizer};
/// use paramsync_reactive::Observable;
/// use paramsync_router::{MemoryRouter, NavigateOptions};
///
/// let router = MemoryRouter::new(["/?page=3"]).unwrap();
/// let page = Observable::new(1u32);
///
/// let _sync = ParamAtomSynchronizer::new(page.clone(), router.clone(), "page", Codec::parse_or(1))
///     .attach()
///     .unwrap();
/// assert_eq!(page.get(), 3);
///
/// page.set(4);
/// assert_eq!(router.location().href(), "/?page=4");
///
/// router.navigate("/?page=9", NavigateOptions::push()).unwrap();
/// assert_eq!(page.get(), 9);
/// ```
pub struct ParamAtomSynchronizer<V, C, S> {
    cell: C,
    store: S,
    param_name: String,
    codec: Codec<V>,
    settle: Settle<V>,
    options: SyncOptions,
}

impl<V, C, S> fmt::Debug for ParamAtomSynchronizer<V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamAtomSynchronizer")
            .field("param_name", &self.param_name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<V, C, S> ParamAtomSynchronizer<V, C, S>
where
    V: Clone + PartialEq + 'static,
    C: ReactiveCell<V> + 'static,
    S: ParamStore + Clone + 'static,
{
    /// Describe a synchronization of `cell` with `param_name` in `store`.
    pub fn new(cell: C, store: S, param_name: impl Into<String>, codec: Codec<V>) -> Self {
        Self {
            cell,
            store,
            param_name: param_name.into(),
            codec,
            settle: Settle::default(),
            options: SyncOptions::default(),
        }
    }

    /// Compare cell values with `eq` instead of `PartialEq`.
    #[must_use]
    pub fn cell_eq(mut self, eq: impl Fn(&V, &V) -> bool + 'static) -> Self {
        self.settle = Settle::by(eq);
        self
    }

    /// History and empty-value policy for URL writes.
    #[must_use]
    pub fn options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Register both edges and seed the cell from the URL.
    pub fn attach(self) -> Result<SyncHandle, SyncError> {
        if self.param_name.is_empty() {
            return Err(SyncError::EmptyParamName);
        }
        let Self {
            cell,
            store,
            param_name,
            codec,
            settle,
            options,
        } = self;
        let name: Rc<str> = Rc::from(param_name);
        let phase = Rc::new(Cell::new(SyncPhase::Uninitialized));
        let seed = Rc::new(Cell::new(Seed::Attaching));
        let mut scope = BindingScope::new();

        scope.hold(cell.subscribe(Box::new({
            let store = store.clone();
            let name = Rc::clone(&name);
            let phase = Rc::clone(&phase);
            let seed = Rc::clone(&seed);
            let encode = Rc::clone(&codec.encode);
            move |value: &V| {
                if phase.get() == SyncPhase::Uninitialized {
                    if seed.get() == Seed::Deferred {
                        phase.set(SyncPhase::Active);
                        tracing::debug!(param = %name, "deferred seed consumed; synchronizer active");
                    } else {
                        seed.set(Seed::Delivered);
                        tracing::trace!(param = %name, "initial replay not written back");
                    }
                    return;
                }
                let proposed = encode(value);
                let current = store.get(&name);
                let remove = proposed.is_empty() && options.empty == EmptyValue::Remove;
                if remove {
                    if current.is_none() {
                        tracing::trace!(param = %name, "param already absent");
                        return;
                    }
                    tracing::debug!(param = %name, "cell -> url (remove)");
                    store.remove(&name, options.navigate_options());
                    return;
                }
                if param_settled(&proposed, current.as_deref()) {
                    tracing::trace!(param = %name, value = %proposed, "url already settled");
                    return;
                }
                tracing::debug!(param = %name, value = %proposed, "cell -> url");
                store.set(&name, proposed, options.navigate_options());
            }
        })));

        // Returns whether the cell's value changed, i.e. whether a cell
        // notification is owed.
        let read_edge: Rc<dyn Fn(Option<&str>) -> bool> = Rc::new({
            let name = Rc::clone(&name);
            let decode = Rc::clone(&codec.decode);
            move |raw: Option<&str>| {
                let proposed = decode(raw);
                let current = cell.read();
                if settle.is_settled(&proposed, &current) {
                    tracing::trace!(param = %name, raw = ?raw, "cell already settled");
                    return false;
                }
                tracing::debug!(param = %name, raw = ?raw, "url -> cell");
                let changed = proposed != current;
                cell.write(proposed);
                changed
            }
        });
        scope.hold(store.subscribe_param(&name, Box::new({
            let read_edge = Rc::clone(&read_edge);
            move |raw: Option<&str>| {
                read_edge(raw);
            }
        })));

        let seeded = read_edge(store.get(&name).as_deref());
        if seeded && seed.get() == Seed::Attaching {
            seed.set(Seed::Deferred);
            tracing::debug!(param = %name, "seed notification held back; waiting for it");
        } else {
            phase.set(SyncPhase::Active);
        }
        tracing::debug!(param = %name, edges = scope.binding_count(), "synchronizer attached");

        Ok(SyncHandle { scope, phase, name })
    }
}

/// A mounted synchronization. Dropping it detaches both edges.
#[must_use = "dropping the handle detaches the synchronizer"]
pub struct SyncHandle {
    scope: BindingScope,
    phase: Rc<Cell<SyncPhase>>,
    name: Rc<str>,
}

impl SyncHandle {
    /// `Uninitialized` only while a held-back seed notification is pending.
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    /// The synchronized query parameter.
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.name
    }

    /// Whether the edges are still registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.scope.is_empty()
    }

    /// Deregister both edges now. Idempotent.
    pub fn detach(&mut self) {
        if self.scope.is_empty() {
            return;
        }
        self.scope.clear();
        tracing::debug!(param = %self.name, "synchronizer detached");
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for SyncHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHandle")
            .field("param_name", &self.name)
            .field("phase", &self.phase.get())
            .field("attached", &self.is_attached())
            .finish()
    }
}
