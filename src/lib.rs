// Library root
// -----------
// All of the moving logic lives here so it can be driven from tests with a
// scripted model. The binary (`main.rs`) only parses arguments, loads the
// configuration and hands a real API client to `app::run`.
//
// Module responsibilities:
// - `config`: settings from `automove.conf` and the environment.
// - `api`: the chat-completions client and the `Oracle` trait it implements.
// - `scanner`: builds the directory structure of the target root.
// - `selector`: asks the oracle for a destination and validates the reply.
// - `relocator` / `ownership`: the copy, rename, delete, chown sequence.
// - `app`: ties the steps together for one file.
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod ownership;
pub mod relocator;
pub mod scanner;
pub mod selector;

pub use app::{run, Invocation, Outcome};
pub use error::{Error, Result};
