use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::state::StateStore;

/// Arguments for managing remembered inputs
#[derive(Args)]
pub struct SavedInputsArgs {
    #[command(subcommand)]
    pub action: SavedInputsAction,
}

#[derive(Subcommand)]
pub enum SavedInputsAction {
    /// Show the inputs remembered from the last projection
    Show,
    /// Forget the remembered inputs
    Clear,
}

pub fn run_saved_inputs(
    args: SavedInputsArgs,
    store: &StateStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let path = store.path().display().to_string();
    match args.action {
        SavedInputsAction::Show => Ok(json!({
            "path": path,
            "result": store.load(),
        })),
        SavedInputsAction::Clear => Ok(json!({
            "path": path,
            "cleared": store.clear()?,
        })),
    }
}
