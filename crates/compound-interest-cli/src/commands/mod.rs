pub mod project;
pub mod saved_inputs;
