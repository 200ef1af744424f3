pub mod check;
pub mod init;
pub mod lint;
pub mod manifest;
pub mod sync;
