pub mod asset;
pub mod entry;
pub mod provider;
pub mod view;
