//! Polls the Practicum homework review API and relays status changes of the
//! latest submission to a Telegram chat.

pub mod app_init;
pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
pub mod notifier;
pub mod result;
