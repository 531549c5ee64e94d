#![forbid(unsafe_code)]

//! Test harness for paramsync.
//!
//! The harness stands in for a component tree: a router at the root, a cell
//! of application state, an optional synchronizer mounted between them, and
//! "display components" that re-render whenever what they show changes.
//!
//! - [`RenderProbe`]: a display bound to an observable. Renders once on mount
//!   and once per change notification, remembering what it last showed.
//! - [`LocationProbe`]: the same, for the router's current href.
//! - [`SyncFixture`]: builds router + cell + probes (+ synchronizer) in mount
//!   order, and exposes the user actions a test needs.
//!
//! Set `RUST_LOG=paramsync=trace` and call [`init_test_logging`] to see every
//! edge decision while a test runs.

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;

use paramsync::{Codec, ParamAtomSynchronizer, SyncHandle, SyncOptions};
use paramsync_reactive::{Observable, Subscription};
use paramsync_router::{Location, MemoryRouter, NavigateOptions};

/// Parameter name shared by the reference scenarios.
pub const TEST_PARAM: &str = "testParamName";

/// Install a test-friendly `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A display component bound to an observable.
pub struct RenderProbe {
    renders: Rc<Cell<usize>>,
    text: Rc<RefCell<String>>,
    _sub: Subscription,
}

impl RenderProbe {
    /// Render `source` now and on every change.
    pub fn mount<T: Clone + PartialEq + Display + 'static>(source: &Observable<T>) -> Self {
        let renders = Rc::new(Cell::new(1));
        let text = Rc::new(RefCell::new(source.with(ToString::to_string)));
        let sub = source.subscribe({
            let renders = Rc::clone(&renders);
            let text = Rc::clone(&text);
            move |value| {
                renders.set(renders.get() + 1);
                text.replace(value.to_string());
            }
        });
        Self {
            renders,
            text,
            _sub: sub,
        }
    }

    /// Renders so far, including the mount render.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    /// What the display currently shows.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl std::fmt::Debug for RenderProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderProbe")
            .field("renders", &self.renders.get())
            .field("text", &*self.text.borrow())
            .finish()
    }
}

/// A display of the router's current `pathname + search + hash`.
#[derive(Debug)]
pub struct LocationProbe {
    inner: RenderProbe,
}

impl LocationProbe {
    pub fn mount(router: &MemoryRouter) -> Self {
        Self {
            inner: RenderProbe::mount(router.location_observable()),
        }
    }

    #[must_use]
    pub fn href(&self) -> String {
        self.inner.text()
    }

    #[must_use]
    pub fn renders(&self) -> usize {
        self.inner.renders()
    }
}

/// Router, cell, displays and (optionally) a synchronizer, mounted together.
pub struct SyncFixture<V: Clone + PartialEq + 'static> {
    pub router: MemoryRouter,
    pub cell: Observable<V>,
    pub display: RenderProbe,
    pub location: LocationProbe,
    pub sync: Option<SyncHandle>,
}

impl<V: Clone + PartialEq + Display + 'static> SyncFixture<V> {
    /// Mount without a synchronizer: cell and URL stay independent.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is not an absolute path.
    pub fn unsynced(entry: &str, initial: V) -> Self {
        let router = MemoryRouter::new([entry]).expect("fixture entry must be absolute");
        let cell = Observable::new(initial);
        let display = RenderProbe::mount(&cell);
        let location = LocationProbe::mount(&router);
        Self {
            router,
            cell,
            display,
            location,
            sync: None,
        }
    }

    /// Mount with a synchronizer on [`TEST_PARAM`].
    ///
    /// Displays mount first so their first render shows the pre-sync value,
    /// matching a component tree where children render before effects run.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is not an absolute path.
    pub fn synced(entry: &str, initial: V, codec: Codec<V>) -> Self {
        Self::synced_with(entry, initial, codec, SyncOptions::default())
    }

    /// [`synced`](Self::synced) with explicit options.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is not an absolute path.
    pub fn synced_with(entry: &str, initial: V, codec: Codec<V>, options: SyncOptions) -> Self {
        let mut fixture = Self::unsynced(entry, initial);
        let handle =
            ParamAtomSynchronizer::new(fixture.cell.clone(), fixture.router.clone(), TEST_PARAM, codec)
                .options(options)
                .attach()
                .expect("TEST_PARAM is not empty");
        fixture.sync = Some(handle);
        fixture
    }

    /// Navigate the way a link click would.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not a valid navigation target.
    pub fn navigate(&self, to: &str) {
        self.router
            .navigate(to, NavigateOptions::push())
            .expect("fixture navigation target must be valid");
    }

    /// Set the cell the way a button handler would.
    pub fn update_cell(&self, value: V) {
        self.cell.set(value);
    }

    /// Unmount the synchronizer, keeping router and cell alive.
    pub fn unmount_sync(&mut self) {
        self.sync = None;
    }

    #[must_use]
    pub fn cell_text(&self) -> String {
        self.display.text()
    }

    #[must_use]
    pub fn href(&self) -> String {
        self.location.href()
    }

    #[must_use]
    pub fn renders(&self) -> usize {
        self.display.renders()
    }

    #[must_use]
    pub fn current_location(&self) -> Location {
        self.router.location()
    }
}

/// The run-length converters from the reference suite: a run of `n` ones in the
/// URL is the number `n` in the cell.
#[must_use]
pub fn ones_codec() -> Codec<usize> {
    Codec::new(
        |raw: Option<&str>| raw.map_or(0, str::len),
        |n: &usize| "1".repeat(*n),
    )
}
