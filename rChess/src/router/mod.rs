//! Navigation router with pre-navigation guards.

mod guard;
mod route;

pub use guard::{AuthGuard, GuardOutcome, NavigationGuard, NavigationIntent};
pub use route::{
    default_routes, normalize_path, Location, RoutePattern, RouteRecord, ViewId, LOGIN_PATH,
};

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::session::Session;

/// Maximum guard redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Anything that accepts fire-and-forget navigations.
pub trait Navigator: Send + Sync {
    /// Navigate to `path`, ignoring the outcome.
    fn navigate(&self, path: &str);
}

/// Outcome of a committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path the caller asked for.
    pub requested: String,
    /// Location that was committed.
    pub location: Location,
    /// Whether a guard rewrote the destination.
    pub redirected: bool,
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<Location>,
    history: Vec<String>,
}

/// Builder for creating Router.
pub struct RouterBuilder {
    routes: Vec<RouteRecord>,
    guards: Vec<Arc<dyn NavigationGuard>>,
    session: Session,
}

impl RouterBuilder {
    /// Start from the default route table and the auth guard.
    pub fn new(session: Session) -> Self {
        let auth: Arc<dyn NavigationGuard> = Arc::new(AuthGuard::new(session.clone()));
        Self {
            routes: default_routes(),
            guards: vec![auth],
            session,
        }
    }

    /// Replace the route table.
    pub fn routes(mut self, routes: Vec<RouteRecord>) -> Self {
        self.routes = routes;
        self
    }

    /// Append a route.
    pub fn route(mut self, record: RouteRecord) -> Self {
        self.routes.push(record);
        self
    }

    /// Append a guard, run after the ones already registered.
    pub fn guard(mut self, guard: impl NavigationGuard + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    /// Build the router.
    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
            guards: self.guards,
            session: self.session,
            state: RwLock::new(RouterState::default()),
        }
    }
}

/// Maps paths to views and guards every transition.
pub struct Router {
    routes: Vec<RouteRecord>,
    guards: Vec<Arc<dyn NavigationGuard>>,
    session: Session,
    state: RwLock<RouterState>,
}

impl Router {
    /// Create a router with the default routes and auth guard.
    pub fn new(session: Session) -> Self {
        Self::builder(session).build()
    }

    /// Create a router builder.
    pub fn builder(session: Session) -> RouterBuilder {
        RouterBuilder::new(session)
    }

    /// Registered routes, in matching order.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Session consulted by the auth guard.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Match a path without guarding or committing it.
    pub fn resolve(&self, path: &str) -> Result<Location> {
        let path = normalize_path(path);
        self.routes
            .iter()
            .find_map(|record| {
                record.pattern.matches(&path).map(|params| Location {
                    path: path.clone(),
                    record: record.clone(),
                    params,
                })
            })
            .ok_or(Error::RouteNotFound(path))
    }

    /// Navigate to `path`, running guards before committing.
    pub fn push(&self, path: &str) -> Result<Navigation> {
        let requested = normalize_path(path);
        let from = self.current();

        let mut target = self.resolve(&requested)?;
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            match self.run_guards(from.as_ref(), &target) {
                GuardOutcome::Allow => {
                    let mut state = self.state.write();
                    state.history.push(target.path.clone());
                    state.current = Some(target.clone());
                    drop(state);

                    log::debug!("navigated to {} ({})", target.path, target.view());
                    return Ok(Navigation {
                        requested,
                        location: target,
                        redirected,
                    });
                }
                GuardOutcome::Redirect(next) => {
                    log::info!("navigation to {} redirected to {}", target.path, next);
                    target = self.resolve(&next)?;
                    redirected = true;
                }
            }
        }

        Err(Error::RedirectLoop(requested))
    }

    /// Location currently committed.
    pub fn current(&self) -> Option<Location> {
        self.state.read().current.clone()
    }

    /// Paths committed so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.read().history.clone()
    }

    fn run_guards(&self, from: Option<&Location>, to: &Location) -> GuardOutcome {
        let intent = NavigationIntent { from, to };
        self.guards
            .iter()
            .map(|guard| guard.check(&intent))
            .find(|outcome| *outcome != GuardOutcome::Allow)
            .unwrap_or(GuardOutcome::Allow)
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        if let Err(e) = self.push(path) {
            log::warn!("navigation to {} failed: {}", path, e);
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("guards", &self.guards.len())
            .field("current", &self.current().map(|l| l.path))
            .finish()
    }
}
