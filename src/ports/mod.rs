mod github;

pub use github::{FileWrite, GitHub, RemoteFile};
