pub mod events;
pub mod request;
pub mod video;

pub use events::{AttributeValue, ChatMessage, ThreadEvent};
pub use request::{ResFrom, ThreadRequest, SUPPORTED_VERSION};
pub use video::{InvalidVideoId, VideoId, VideoInfo};
