//! Route table definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a view component, resolved lazily by a [`ViewLoader`]
///
/// [`ViewLoader`]: super::ViewLoader
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single path-to-view mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// URL path, always starting with `/`
    pub path: String,
    /// Unique route name
    pub name: String,
    /// View shown at this path
    pub view: ViewId,
    /// Whether entering requires an authenticated session
    #[serde(default)]
    pub requires_auth: bool,
}

impl Route {
    /// Create a public route
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: ViewId::new(view),
            requires_auth: false,
        }
    }

    /// Mark the route as requiring authentication
    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// Validated, immutable collection of routes
///
/// Paths and names are each unique across the table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths or names and relative paths
    pub fn new(routes: Vec<Route>) -> crate::Result<Self> {
        let mut by_path = HashMap::with_capacity(routes.len());
        let mut by_name = HashMap::with_capacity(routes.len());
        let mut errors = Vec::new();

        for (index, route) in routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                errors.push(format!("route path '{}' must start with '/'", route.path));
            }
            if by_path.insert(route.path.clone(), index).is_some() {
                errors.push(format!("duplicate route path '{}'", route.path));
            }
            if by_name.insert(route.name.clone(), index).is_some() {
                errors.push(format!("duplicate route name '{}'", route.name));
            }
        }

        if !errors.is_empty() {
            return Err(crate::Error::Validation(errors.join("; ")));
        }

        Ok(Self {
            routes,
            by_path,
            by_name,
        })
    }

    /// Look up a route by path
    pub fn route(&self, path: &str) -> Option<&Route> {
        self.index_of(path).map(|i| &self.routes[i])
    }

    /// Look up a route by name
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.routes[i])
    }

    /// Position of the route registered at `path`
    pub(crate) fn index_of(&self, path: &str) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    /// Route at a position previously returned by `index_of`
    pub(crate) fn route_at(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Routes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_path_and_name() {
        let table = RouteTable::new(vec![
            Route::new("/", "home", "LandingPage"),
            Route::new("/profile", "UserProfile", "UserProfile").requires_auth(),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.route("/").unwrap().name, "home");
        assert!(table.by_name("UserProfile").unwrap().requires_auth);
        assert!(table.route("/missing").is_none());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = RouteTable::new(vec![
            Route::new("/chatbot", "chatbot", "Chatbot"),
            Route::new("/chatbot", "chatbot2", "Chatbot"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate route path '/chatbot'"));
    }

    #[test]
    fn test_duplicate_name_and_relative_path_rejected() {
        let err = RouteTable::new(vec![
            Route::new("/a", "same", "A"),
            Route::new("b", "same", "B"),
        ])
        .unwrap_err()
        .to_string();
        assert!(err.contains("duplicate route name 'same'"));
        assert!(err.contains("must start with '/'"));
    }

    #[test]
    fn test_route_deserializes_with_default_flag() {
        let route: Route =
            serde_json::from_str(r#"{"path":"/about","name":"about","view":"AboutView"}"#)
                .unwrap();
        assert!(!route.requires_auth);
        assert_eq!(route.view.as_str(), "AboutView");
    }
}
