//! Site configuration: schema, loading and the generator-native format

pub mod loader;
pub mod pyconf;
mod schema;

pub use loader::{
    default_config_content, find_config_file, load_config, load_config_from_path,
    load_config_from_str, SourceFormat,
};
pub use pyconf::{parse_pyconf, to_pyconf};
pub use schema::*;
