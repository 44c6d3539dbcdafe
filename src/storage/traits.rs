use serde_json::Value;

use super::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// A named survey document. `content` is opaque and returned verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct Survey {
    pub name: String,
    pub content: Value,
}

pub trait SurveyRead {
    /// Every stored survey name, in the store's natural order.
    fn list_surveys(&self) -> StoreResult<Vec<String>>;
    /// Exact-key lookup; `Ok(None)` when nothing is stored under `name`.
    fn get_survey(&self, name: &str) -> StoreResult<Option<Survey>>;
}

pub trait SurveyWrite {
    /// Creates or fully replaces the survey stored under `name`.
    fn put_survey(&self, name: &str, content: &Value) -> StoreResult<()>;
}

/// Hands out handles bound to one database and one container. Repeated calls
/// reuse the open connection instead of reconnecting.
pub trait Storage {
    type Handle: SurveyRead + SurveyWrite;

    fn get_client(&self) -> StoreResult<Self::Handle>;
}
