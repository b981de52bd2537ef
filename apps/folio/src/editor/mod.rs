pub mod download;
pub mod recent;
pub mod request;
pub mod session;

pub use download::FileSink;
pub use request::RequestState;
pub use session::ProfileEditor;
