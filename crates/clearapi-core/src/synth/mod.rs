pub mod command;
pub mod example;

pub use command::{CommandOptions, build_command, build_command_with_options};
pub use example::{ExampleContext, example_json, synthesize_default, synthesize_example};
