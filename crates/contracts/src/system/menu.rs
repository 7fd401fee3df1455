use serde::{Deserialize, Serialize};

/// A menu row as stored by the backend.
///
/// `component` names the view to render; an empty string marks a pure
/// grouping entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    #[serde(default)]
    pub parent_id: i64,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order_num: i32,
    #[serde(default)]
    pub redirect: String,
    #[serde(default)]
    pub is_catalogue: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub keep_alive: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub external_link: String,
}

/// `GET /api/menu/user_list` item: first-level menu with its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuTreeVo {
    #[serde(flatten)]
    pub menu: Menu,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<MenuTreeVo>,
}

// The backend serializes an absent child list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MenuTreeVo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<MenuTreeVo>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_tree_null_children() {
        let tree: Vec<MenuTreeVo> = serde_json::from_value(json!([
            {
                "id": 2,
                "name": "Article",
                "path": "/article",
                "component": "Layout",
                "icon": "ic:twotone-article",
                "order_num": 1,
                "children": [
                    { "id": 3, "parent_id": 2, "name": "ArticleList", "path": "list",
                      "component": "/article/list", "children": null }
                ]
            },
            { "id": 9, "name": "Home", "path": "/", "children": null }
        ]))
        .unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].menu.name, "Article");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].menu.parent_id, 2);
        assert!(tree[0].children[0].children.is_empty());
        assert!(tree[1].children.is_empty());
        assert!(tree[1].menu.component.is_empty());
    }
}
