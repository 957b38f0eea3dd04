use serde::Deserialize;

/// Yahoo's `{ "raw": <epoch>, "fmt": "YYYY-MM-DD" }` date wrapper.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawDate {
    pub(crate) raw: Option<i64>,
    pub(crate) fmt: Option<String>,
}

/// Yahoo's `{ "raw": true }` boolean wrapper; some payloads send a bare bool instead.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(untagged)]
pub enum RawBool {
    Wrapped { raw: Option<bool> },
    Bare(bool),
}

impl RawBool {
    pub(crate) fn value(self) -> Option<bool> {
        match self {
            RawBool::Wrapped { raw } => raw,
            RawBool::Bare(b) => Some(b),
        }
    }
}
