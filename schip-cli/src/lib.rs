mod app;
mod config;
mod error;
mod script;

pub use self::{
    app::{App, RunOptions, Stop},
    config::AppConfig,
    error::{AppError, ErrorKind},
    script::{InputScript, KeyEvent},
};
