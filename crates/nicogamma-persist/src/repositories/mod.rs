mod thread;
mod video;

pub use thread::ThreadRepository;
pub use video::VideoRepository;
