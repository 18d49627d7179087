//! Settings for the Top-N reducer. They come from the invocation
//! environment (`TOPN`, `HEADER`), never from the data stream.

pub const DEFAULT_LIMIT: usize = 50;

/// Environment variable holding the row limit.
pub const LIMIT_VAR: &str = "TOPN";

/// Environment variable holding the comma separated header.
pub const HEADER_VAR: &str = "HEADER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopNConfig {
    pub limit: usize,
    pub header: Option<Vec<String>>,
}

impl Default for TopNConfig {
    fn default() -> Self {
        TopNConfig {
            limit: DEFAULT_LIMIT,
            header: None,
        }
    }
}

impl TopNConfig {
    pub fn new(limit: usize, header: Option<&str>) -> Self {
        TopNConfig {
            limit,
            header: header.and_then(parse_header),
        }
    }

    pub fn with_header(mut self, columns: &[&str]) -> Self {
        self.header = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }
}

/// Splits a `a, b` style header into trimmed column names. Blank means none.
pub fn parse_header(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(raw.split(',').map(|name| name.trim().to_string()).collect())
}
