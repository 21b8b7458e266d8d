pub mod command;
pub mod error;
pub mod library;
pub mod snapshot;
pub mod spotify;
pub mod traits;

pub use command::{Command, CommandField};
pub use error::{ErrorKind, RemoteError};
pub use library::{ItemKind, LibraryItem, PlayTarget, SearchResults};
pub use snapshot::{DeviceInfo, PlaybackSnapshot, RepeatMode, TrackInfo};
pub use traits::{LibraryService, PlaybackService, TokenProvider};
