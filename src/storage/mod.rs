mod error;
pub mod sqlite;
pub mod traits;

pub use error::StoreError;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StoreResult, Survey, SurveyRead, SurveyWrite};
