//! Route records and path matching.

use std::collections::BTreeMap;
use std::fmt;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Views the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Home,
    Register,
    Login,
    AiChess,
    GameHistory,
    GameDetail,
}

impl ViewId {
    /// All views, in route table order.
    pub const ALL: [ViewId; 6] = [
        ViewId::Home,
        ViewId::Register,
        ViewId::Login,
        ViewId::AiChess,
        ViewId::GameHistory,
        ViewId::GameDetail,
    ];

    /// Stable name of the view.
    pub fn name(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Register => "register",
            ViewId::Login => "login",
            ViewId::AiChess => "ai-chess",
            ViewId::GameHistory => "game-history",
            ViewId::GameDetail => "game-detail",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A path pattern made of static segments and `:name` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/game/:game_id`.
    pub fn parse(pattern: &str) -> Self {
        let raw = normalize_path(pattern);
        let segments = split_segments(&raw)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Static(s.to_owned()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters in this pattern.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .collect()
    }

    /// Match a normalized path, returning extracted parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_owned());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Mapping from a path pattern to a view plus its auth requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub pattern: RoutePattern,
    pub view: ViewId,
    pub requires_auth: bool,
}

impl RouteRecord {
    /// A route anyone may visit.
    pub fn public(pattern: &str, view: ViewId) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            view,
            requires_auth: false,
        }
    }

    /// A route that needs a stored credential.
    pub fn protected(pattern: &str, view: ViewId) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            view,
            requires_auth: true,
        }
    }
}

/// The application's route table.
pub fn default_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::protected("/", ViewId::Home),
        RouteRecord::public("/register", ViewId::Register),
        RouteRecord::public(LOGIN_PATH, ViewId::Login),
        RouteRecord::protected("/ai-chess", ViewId::AiChess),
        RouteRecord::protected("/game-history", ViewId::GameHistory),
        RouteRecord::protected("/game/:game_id", ViewId::GameDetail),
    ]
}

/// A path matched against a route record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Normalized path.
    pub path: String,
    /// The matched record.
    pub record: RouteRecord,
    /// Path parameters (`game_id` -> `665f...`).
    pub params: BTreeMap<String, String>,
}

impl Location {
    /// View to render for this location.
    pub fn view(&self) -> ViewId {
        self.record.view
    }

    /// Get a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether the matched record needs a credential.
    pub fn requires_auth(&self) -> bool {
        self.record.requires_auth
    }
}

/// Strip query, fragment and trailing slashes; ensure a leading slash.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{}", trimmed)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/login/"), "/login");
        assert_eq!(normalize_path("ai-chess"), "/ai-chess");
        assert_eq!(normalize_path("/game-history?page=2#top"), "/game-history");
    }

    #[test]
    fn test_static_match() {
        let pattern = RoutePattern::parse("/ai-chess");
        assert_eq!(pattern.matches("/ai-chess"), Some(BTreeMap::new()));
        assert_eq!(pattern.matches("/ai-chess/extra"), None);
        assert_eq!(pattern.matches("/"), None);
    }

    #[test]
    fn test_root_match() {
        let pattern = RoutePattern::parse("/");
        assert_eq!(pattern.matches("/"), Some(BTreeMap::new()));
        assert_eq!(pattern.matches("/login"), None);
    }

    #[test]
    fn test_param_match() {
        let pattern = RoutePattern::parse("/game/:game_id");
        assert_eq!(pattern.param_names(), vec!["game_id"]);

        let params = pattern.matches("/game/665f1c").unwrap();
        assert_eq!(params.get("game_id").map(String::as_str), Some("665f1c"));

        assert_eq!(pattern.matches("/game"), None);
        assert_eq!(pattern.matches("/games/665f1c"), None);
    }

    #[test]
    fn test_default_routes() {
        let routes = default_routes();
        let table: Vec<(&str, bool)> = routes
            .iter()
            .map(|r| (r.pattern.as_str(), r.requires_auth))
            .collect();

        assert_eq!(
            table,
            vec![
                ("/", true),
                ("/register", false),
                ("/login", false),
                ("/ai-chess", true),
                ("/game-history", true),
                ("/game/:game_id", true),
            ]
        );
        let views: Vec<ViewId> = routes.iter().map(|r| r.view).collect();
        assert_eq!(views, ViewId::ALL.to_vec());
    }
}
