//! CLI domain: parse, route, and output only.
//! No content logic; the route table dispatches straight to the facade.

mod output;
mod parse;
mod route;

pub use output::{map_error, render_json};
pub use parse::{Cli, Commands};
pub use route::RunContext;
