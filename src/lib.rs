extern crate chrono;
extern crate config;
#[macro_use]
extern crate error_chain;
extern crate form_urlencoded;
#[macro_use]
extern crate log;
extern crate rocket;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod settings;
pub use settings::Settings;

pub mod app;
pub use app::{App, CommandHandler};

pub mod slack;
