pub mod reading_id;
pub mod validated_json;

pub use reading_id::ReadingId;
pub use validated_json::ValidatedJson;
