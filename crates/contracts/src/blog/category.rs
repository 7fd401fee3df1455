use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /api/category/list` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryVo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub article_count: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /api/category` body: creates when `id` is 0, updates otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl From<CategoryVo> for CategoryForm {
    fn from(vo: CategoryVo) -> Self {
        Self {
            id: vo.id,
            name: vo.name,
        }
    }
}
