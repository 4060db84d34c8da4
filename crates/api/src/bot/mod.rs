//! Telegram bot runtime: command parsing, reply texts, update routing, and
//! the long-polling loop.

pub mod backoff;
pub mod command;
pub mod dispatcher;
pub mod poller;
pub mod replies;

pub use dispatcher::Dispatcher;
pub use poller::Poller;
pub use replies::Reply;
