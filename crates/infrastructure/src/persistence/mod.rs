//! File-backed persistence.

mod credentials_file;

pub use credentials_file::TomlCredentialStore;
