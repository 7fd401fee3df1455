use serde::{Deserialize, Serialize};

/// Name of the view factory a route renders (see `routes::views`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewKey(pub String);

impl ViewKey {
    pub const LAYOUT: &'static str = "layout";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_layout(&self) -> bool {
        self.0 == Self::LAYOUT
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub keep_alive: bool,
}

/// A navigable entry: a page, or a page group when it has children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub name: String,
    pub path: String,
    pub component: ViewKey,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_catalogue: bool,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            component: ViewKey::new(component),
            redirect: None,
            is_hidden: false,
            is_catalogue: false,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = title.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.meta.icon = Some(icon.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.meta.order = order;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn catalogue(mut self) -> Self {
        self.is_catalogue = true;
        self
    }

    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    pub fn child(mut self, child: RouteRecord) -> Self {
        self.children.push(child);
        self
    }

    /// Every name in this subtree, parent first.
    pub fn names(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        for child in &self.children {
            out.extend(child.names());
        }
        out
    }
}

/// Join a child path onto its parent's full path.
///
/// Absolute child paths are kept as they are.
pub fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    let parent = parent.trim_end_matches('/');
    if child.is_empty() {
        return if parent.is_empty() { "/".to_string() } else { parent.to_string() };
    }
    format!("{}/{}", parent, child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/", "home"), "/home");
        assert_eq!(join_path("/article", "list"), "/article/list");
        assert_eq!(join_path("/article/", "list"), "/article/list");
        assert_eq!(join_path("/article", "/write"), "/write");
        assert_eq!(join_path("/article", ""), "/article");
        assert_eq!(join_path("/", ""), "/");
    }

    #[test]
    fn test_names_walk_subtree() {
        let route = RouteRecord::new("System", "/system", ViewKey::LAYOUT)
            .child(RouteRecord::new("Menu", "menu", "system/menu"))
            .child(
                RouteRecord::new("Role", "role", "system/role")
                    .child(RouteRecord::new("RoleDetail", "detail", "system/role/detail")),
            );
        assert_eq!(route.names(), vec!["System", "Menu", "Role", "RoleDetail"]);
    }

    #[test]
    fn test_deserialize_minimal() {
        let route: RouteRecord = serde_json::from_str(
            r#"{"name":"Home","path":"/","component":"layout","children":[{"name":"HomePage","path":"home","component":"home"}]}"#,
        )
        .unwrap();
        assert_eq!(route.children[0].component, ViewKey::new("home"));
        assert!(!route.is_hidden);
        assert_eq!(route.meta, RouteMeta::default());
    }
}
