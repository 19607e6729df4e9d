// Library for tests to access modules

pub mod alerts;
pub mod config;
pub mod history;
pub mod models;
pub mod poller;
pub mod presenter;
pub mod source;
pub mod version;
