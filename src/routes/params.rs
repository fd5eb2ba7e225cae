use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantityQuery {
    pub quantity: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let (page, per_page, offset) = Pagination::default().normalize();
        assert_eq!((page, per_page, offset), (1, 20, 0));

        let p = Pagination {
            page: Some(3),
            per_page: Some(1000),
        };
        let (page, per_page, offset) = p.normalize();
        assert_eq!((page, per_page, offset), (3, 100, 200));

        let p = Pagination {
            page: Some(-1),
            per_page: Some(0),
        };
        let (page, per_page, _) = p.normalize();
        assert_eq!((page, per_page), (1, 1));
    }
}
