mod record;
mod video_data;

pub use record::{parse_thread_record, parse_thread_entry};
pub use video_data::VideoData;
