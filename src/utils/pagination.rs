use serde::{Deserialize, Deserializer};

/// Fixed page size shared by the todo list and the admin overview.
pub const ITEMS_PER_PAGE: i64 = 10;

/// Query-string numbers arrive as strings; treat empty as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Clamp a 1-based page number, defaulting to the first page.
pub fn page_number(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a 1-based page number.
pub fn page_offset(page: Option<i64>) -> i64 {
    (page_number(page) - 1) * ITEMS_PER_PAGE
}

/// Ceil-divide a row count into page count.
pub fn total_pages(total: i64) -> i64 {
    (total + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
    }

    #[test]
    fn test_page_defaults_to_one() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_offset(None), 0);
    }

    #[test]
    fn test_page_below_one_clamped() {
        assert_eq!(page_number(Some(0)), 1);
        assert_eq!(page_number(Some(-3)), 1);
        assert_eq!(page_offset(Some(-3)), 0);
    }

    #[test]
    fn test_offset_from_page() {
        assert_eq!(page_offset(Some(1)), 0);
        assert_eq!(page_offset(Some(2)), 10);
        assert_eq!(page_offset(Some(5)), 40);
    }

    #[test]
    fn test_total_pages_ceil_division() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(100), 10);
        assert_eq!(total_pages(101), 11);
    }

    #[test]
    fn test_deserialize_from_query_strings() {
        let params: Params = serde_json::from_str(r#"{"page":"3"}"#).unwrap();
        assert_eq!(page_number(params.page), 3);

        let params: Params = serde_json::from_str(r#"{"page":""}"#).unwrap();
        assert_eq!(page_number(params.page), 1);

        let params: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(page_number(params.page), 1);
    }
}
