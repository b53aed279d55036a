use std::fmt::{self, Display};

/// Version segment of the API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn prefix(self) -> &'static str {
        match self {
            ApiVersion::V1 => "api/1",
            ApiVersion::V2 => "api/2",
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        };
        write!(f, "{label}")
    }
}

/// Builds endpoint URLs. Path segments are inserted as given so that empty
/// or malformed identifiers reach the service unchanged.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn create_item(&self) -> String {
        format!("{}/{}/item", self.base_url, ApiVersion::V1.prefix())
    }

    pub fn item(&self, version: ApiVersion, id: &str) -> String {
        format!("{}/{}/item/{id}", self.base_url, version.prefix())
    }

    pub fn seller_items(&self, seller: &str) -> String {
        format!("{}/{}/{seller}/item", self.base_url, ApiVersion::V1.prefix())
    }

    pub fn statistic(&self, version: ApiVersion, id: &str) -> String {
        format!("{}/{}/statistic/{id}", self.base_url, version.prefix())
    }
}
