pub mod access;
pub mod completions;
pub mod config;
pub mod connect;
pub mod list;
pub mod owner;
pub mod post;
pub mod profile;
pub mod show;
pub mod tip;
