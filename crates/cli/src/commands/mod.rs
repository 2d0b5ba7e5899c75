pub mod build;
pub mod init;
pub mod preview;
pub mod validate;
