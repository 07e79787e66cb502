//! Form definition adapters.
//!
//! - **load_form_definitions** - Reads every `*.yaml`/`*.yml` file in a directory

mod yaml_loader;

pub use yaml_loader::load_form_definitions;
