//! Application bootstrap: one session, client and router per process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::client::{ChessClient, ChessClientBuilder};
use crate::error::{Error, Result};
use crate::router::{Location, Navigation, RouteRecord, Router, ViewId, MAX_REDIRECTS};
use crate::session::{KeyValueStore, MemoryStore, Session};

/// A page of the application.
#[async_trait]
pub trait View: Send + Sync {
    /// Show the page for `ctx.location`.
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<()>;
}

/// What a view gets to work with while rendering.
pub struct ViewContext<'a> {
    pub app: &'a App,
    pub location: &'a Location,
}

impl ViewContext<'_> {
    /// Shared HTTP client.
    pub fn client(&self) -> &ChessClient {
        &self.app.client
    }

    /// Shared router.
    pub fn router(&self) -> &Router {
        &self.app.router
    }

    /// Shared session.
    pub fn session(&self) -> &Session {
        &self.app.session
    }

    /// Path parameter of the current location.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.location.param(name)
    }
}

/// Builder for creating App.
pub struct AppBuilder {
    store: Option<Arc<dyn KeyValueStore>>,
    client: ChessClientBuilder,
    routes: Option<Vec<RouteRecord>>,
    views: HashMap<ViewId, Arc<dyn View>>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            store: None,
            client: ChessClientBuilder::new(),
            routes: None,
            views: HashMap::new(),
        }
    }

    /// Persistent storage for the credential. Defaults to memory.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.base_url(url);
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.connect_timeout(timeout);
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.read_timeout(timeout);
        self
    }

    /// Replace the default route table.
    pub fn routes(mut self, routes: Vec<RouteRecord>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Register the view shown for `id`.
    pub fn view(mut self, id: ViewId, view: impl View + 'static) -> Self {
        self.views.insert(id, Arc::new(view));
        self
    }

    /// Wire everything together. Every routed view must be registered.
    pub fn build(self) -> Result<App> {
        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };
        let session = Session::new(store);

        let mut router = Router::builder(session.clone());
        if let Some(routes) = self.routes {
            router = router.routes(routes);
        }
        let router = Arc::new(router.build());

        if let Some(missing) = router
            .routes()
            .iter()
            .find(|r| !self.views.contains_key(&r.view))
        {
            return Err(Error::ViewMissing(format!(
                "{} ({})",
                missing.view, missing.pattern
            )));
        }

        let client = self
            .client
            .session(session.clone())
            .navigator(router.clone())
            .build()?;

        log::debug!(
            "app ready: {} routes, base url {}",
            router.routes().len(),
            client.base_url()
        );

        Ok(App {
            client,
            router,
            session,
            views: self.views,
        })
    }
}

/// The running application.
pub struct App {
    client: ChessClient,
    router: Arc<Router>,
    session: Session,
    views: HashMap<ViewId, Arc<dyn View>>,
}

impl App {
    /// Create a new app builder.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &ChessClient {
        &self.client
    }

    /// Shared router.
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Shared session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Navigate to `path` and render the committed location.
    ///
    /// Navigations issued while rendering (a 401 redirect, a view moving on)
    /// are rendered too. The first error from any render is returned after
    /// that.
    pub async fn open(&self, path: &str) -> Result<Navigation> {
        let navigation = self.router.push(path)?;

        let mut location = navigation.location.clone();
        let mut seen = self.router.history().len();
        let mut outcome = self.render(&location).await;

        for _ in 0..MAX_REDIRECTS {
            let history = self.router.history().len();
            if history == seen {
                break;
            }
            seen = history;

            let Some(next) = self.router.current() else {
                break;
            };
            log::debug!("rendering {} after navigation from {}", next.path, location.path);
            location = next;

            let rendered = self.render(&location).await;
            if outcome.is_ok() {
                outcome = rendered;
            }
        }

        outcome.map(|()| navigation)
    }

    async fn render(&self, location: &Location) -> Result<()> {
        let view = self
            .views
            .get(&location.view())
            .ok_or_else(|| Error::ViewMissing(location.view().to_string()))?;

        let ctx = ViewContext {
            app: self,
            location,
        };
        view.render(&ctx).await
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("client", &self.client)
            .field("router", &self.router)
            .field("views", &self.views.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{header, serve};
    use crate::router::Navigator;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    /// Records what was rendered; optionally hits an endpoint.
    #[derive(Clone, Default)]
    struct Probe {
        rendered: Arc<Mutex<Vec<String>>>,
    }

    struct ProbeView {
        probe: Probe,
        fetch: bool,
    }

    #[async_trait]
    impl View for ProbeView {
        async fn render(&self, ctx: &ViewContext<'_>) -> Result<()> {
            self.probe.rendered.lock().push(ctx.location.path.clone());
            if self.fetch {
                ctx.client().games().history().await?;
            }
            Ok(())
        }
    }

    fn build(probe: &Probe, base_url: &str, token: Option<&str>) -> App {
        let mut builder = App::builder().base_url(base_url);
        for id in ViewId::ALL {
            builder = builder.view(
                id,
                ProbeView {
                    probe: probe.clone(),
                    fetch: id == ViewId::AiChess,
                },
            );
        }
        let app = builder.build().unwrap();
        if let Some(token) = token {
            app.session().set(token).unwrap();
        }
        app
    }

    #[test]
    fn test_missing_view() {
        let err = App::builder().build().unwrap_err();
        assert!(matches!(err, Error::ViewMissing(_)));
    }

    #[tokio::test]
    async fn test_open_without_token_renders_login() {
        let probe = Probe::default();
        let app = build(&probe, "http://localhost:5000/", None);

        let nav = app.open("/ai-chess").await.unwrap();
        assert_eq!(nav.location.path, "/login");
        assert!(nav.redirected);
        assert_eq!(*probe.rendered.lock(), vec!["/login".to_owned()]);
    }

    #[tokio::test]
    async fn test_open_with_token_sends_bearer() {
        let (base_url, mut requests) = serve(vec![(200, r#"{"games": []}"#)]).await;
        let probe = Probe::default();
        let app = build(&probe, &base_url, Some("abc"));

        let nav = app.open("/ai-chess").await.unwrap();
        assert_eq!(nav.location.path, "/ai-chess");
        assert_eq!(*probe.rendered.lock(), vec!["/ai-chess".to_owned()]);

        let request = requests.recv().await.unwrap();
        assert_eq!(header(&request, "authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_unauthorized_view_falls_back_to_login() {
        let (base_url, _requests) = serve(vec![(401, r#"{"message": "Token is invalid!"}"#)]).await;
        let probe = Probe::default();
        let app = build(&probe, &base_url, Some("expired"));

        let err = app.open("/ai-chess").await.unwrap_err();
        assert!(err.is_auth_error());
        assert!(!app.session().is_authenticated());
        assert_eq!(
            *probe.rendered.lock(),
            vec!["/ai-chess".to_owned(), "/login".to_owned()]
        );
        assert_eq!(app.router().current().unwrap().view(), ViewId::Login);
    }

    #[tokio::test]
    async fn test_view_navigation_is_followed() {
        struct Forward;

        #[async_trait]
        impl View for Forward {
            async fn render(&self, ctx: &ViewContext<'_>) -> Result<()> {
                ctx.router().navigate("/register");
                Ok(())
            }
        }

        let probe = Probe::default();
        let mut builder = App::builder();
        for id in ViewId::ALL {
            builder = builder.view(id, ProbeView { probe: probe.clone(), fetch: false });
        }
        let app = builder.view(ViewId::Login, Forward).build().unwrap();

        app.open("/login").await.unwrap();
        assert_eq!(*probe.rendered.lock(), vec!["/register".to_owned()]);
        assert_eq!(app.router().history(), vec!["/login", "/register"]);
    }
}
