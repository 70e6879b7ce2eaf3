//! Lazy view resolution and the navigation guard

use super::table::{Route, RouteTable, ViewId};
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Loads a view the first time its route is visited
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// The loaded view handed back to the application shell
    type View: Send + Sync + 'static;

    /// Load the view identified by `view`
    async fn load(&self, view: &ViewId) -> crate::Result<Self::View>;
}

/// Outcome of a guarded navigation
#[derive(Debug)]
pub enum Navigation<V> {
    /// The route was entered and its view resolved
    Entered { route: Route, view: Arc<V> },
    /// The route needs a session; the visitor is sent to the login route
    Redirected { from: String, to: String },
}

impl<V> Navigation<V> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirected { .. })
    }
}

/// Route table plus a per-route cache of loaded views
///
/// Each route's view is loaded at most once for the lifetime of the router,
/// including when several navigations to it race.
pub struct Router<L: ViewLoader> {
    table: RouteTable,
    loader: L,
    views: Vec<OnceCell<Arc<L::View>>>,
    login_route: String,
}

impl<L: ViewLoader> Router<L> {
    /// Create a router that redirects guarded routes to `login_route`
    pub fn new(
        table: RouteTable,
        loader: L,
        login_route: impl Into<String>,
    ) -> crate::Result<Self> {
        let login_route = login_route.into();
        match table.route(&login_route) {
            None => {
                return Err(Error::Config(format!(
                    "login route '{}' is not in the route table",
                    login_route
                )))
            }
            Some(route) if route.requires_auth => {
                return Err(Error::Validation(format!(
                    "login route '{}' must not require authentication",
                    login_route
                )))
            }
            Some(_) => {}
        }

        let views = (0..table.len()).map(|_| OnceCell::new()).collect();
        Ok(Self {
            table,
            loader,
            views,
            login_route,
        })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Resolve the view at `path`, loading it on first use
    pub async fn resolve(&self, path: &str) -> crate::Result<Arc<L::View>> {
        let index = self
            .table
            .index_of(path)
            .ok_or_else(|| Error::NotFound(format!("no route for path '{}'", path)))?;
        let route = self.table.route_at(index);

        let view = self.views[index]
            .get_or_try_init(|| async {
                debug!(path = %route.path, view = %route.view, "Loading view");
                self.loader.load(&route.view).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(view))
    }

    /// Whether the view at `path` has already been loaded
    pub fn is_loaded(&self, path: &str) -> bool {
        self.table
            .index_of(path)
            .is_some_and(|i| self.views[i].initialized())
    }

    /// Enter `path`, enforcing `requires_auth` against `authenticated`
    ///
    /// A redirected navigation never loads the guarded view.
    pub async fn navigate(
        &self,
        path: &str,
        authenticated: bool,
    ) -> crate::Result<Navigation<L::View>> {
        let route = self
            .table
            .route(path)
            .ok_or_else(|| Error::NotFound(format!("no route for path '{}'", path)))?;

        if route.requires_auth && !authenticated {
            info!(from = %path, to = %self.login_route, "Redirecting unauthenticated navigation");
            return Ok(Navigation::Redirected {
                from: path.to_string(),
                to: self.login_route.clone(),
            });
        }

        let route = route.clone();
        let view = self.resolve(path).await?;
        Ok(Navigation::Entered { route, view })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLoader {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl ViewLoader for CountingLoader {
        type View = String;

        async fn load(&self, view: &ViewId) -> crate::Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(format!("<{}>", view))
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl ViewLoader for FailingLoader {
        type View = String;

        async fn load(&self, view: &ViewId) -> crate::Result<String> {
            Err(Error::View(format!("chunk for {} missing", view)))
        }
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("/", "home", "LandingPage"),
            Route::new("/userlogin", "userlogin", "Login"),
            Route::new("/profile", "UserProfile", "UserProfile").requires_auth(),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_view_loaded_once_per_route() {
        let router = Router::new(table(), CountingLoader::default(), "/userlogin").unwrap();

        assert!(!router.is_loaded("/"));
        let first = router.resolve("/").await.unwrap();
        let second = router.resolve("/").await.unwrap();
        router.resolve("/userlogin").await.unwrap();

        assert_eq!(first.as_str(), "<LandingPage>");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(router.is_loaded("/"));
        assert_eq!(router.loader.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_racing_first_navigations_load_once() {
        let router = Router::new(table(), CountingLoader::default(), "/userlogin").unwrap();

        let (a, b, c) = tokio::join!(
            router.resolve("/"),
            router.resolve("/"),
            router.resolve("/")
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(router.loader.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let router = Router::new(table(), CountingLoader::default(), "/userlogin").unwrap();
        let err = router.resolve("/nowhere").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_guard_redirects_without_loading() {
        let router = Router::new(table(), CountingLoader::default(), "/userlogin").unwrap();

        let nav = router.navigate("/profile", false).await.unwrap();
        match nav {
            Navigation::Redirected { from, to } => {
                assert_eq!(from, "/profile");
                assert_eq!(to, "/userlogin");
            }
            Navigation::Entered { .. } => panic!("expected redirect"),
        }
        assert!(!router.is_loaded("/profile"));
        assert_eq!(router.loader.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guard_enters_when_authenticated() {
        let router = Router::new(table(), CountingLoader::default(), "/userlogin").unwrap();

        let nav = router.navigate("/profile", true).await.unwrap();
        assert!(!nav.is_redirect());
        if let Navigation::Entered { route, view } = nav {
            assert_eq!(route.name, "UserProfile");
            assert_eq!(view.as_str(), "<UserProfile>");
        }

        let public = router.navigate("/", false).await.unwrap();
        assert!(!public.is_redirect());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_view_unloaded() {
        let router = Router::new(table(), FailingLoader, "/userlogin").unwrap();
        let err = router.resolve("/").await.unwrap_err();
        assert!(matches!(err, Error::View(_)));
        assert!(!router.is_loaded("/"));
    }

    #[test]
    fn test_login_route_must_exist_and_be_public() {
        let missing = Router::new(table(), CountingLoader::default(), "/signin");
        assert!(matches!(missing, Err(Error::Config(_))));

        let guarded = Router::new(table(), CountingLoader::default(), "/profile");
        assert!(matches!(guarded, Err(Error::Validation(_))));
    }
}
