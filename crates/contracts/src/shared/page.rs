use serde::{Deserialize, Serialize};

/// Paging and keyword filter of list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page_num: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
            keyword: String::new(),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default)]
    pub page_num: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "Vec::new")]
    pub page_data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_result_decodes() {
        let page: PageResult<i64> = serde_json::from_value(json!({
            "page_num": 1,
            "page_size": 10,
            "total": 2,
            "page_data": [3, 4]
        }))
        .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.page_data, vec![3, 4]);
    }
}
