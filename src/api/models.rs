use serde::{Deserialize, Serialize};

/// Engagement counters attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub likes: i64,
    pub view_count: i64,
    pub contacts: i64,
}

impl Statistics {
    pub fn new(likes: i64, view_count: i64, contacts: i64) -> Self {
        Self {
            likes,
            view_count,
            contacts,
        }
    }
}

/// Body of `POST /api/1/item`. `name` and `price` are optional so that
/// requests missing them can be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    #[serde(rename = "sellerID")]
    pub seller_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    pub statistics: Statistics,
}

impl NewItem {
    pub fn new(seller_id: i64, name: impl Into<String>, price: i64) -> Self {
        Self {
            seller_id,
            name: Some(name.into()),
            price: Some(price),
            statistics: Statistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn without_price(mut self) -> Self {
        self.price = None;
        self
    }
}
