//! Configuration types for logickey: logic keys, click actions, extra routing
//! rows, and the scenario to launch, loaded from RON files.

mod error;
mod loader;
mod types;

#[cfg(test)]
mod test_parse;

pub use error::Error;
pub use loader::{load_from_path, load_from_str};
pub use types::{
    ClickAction, Config, LOGIC_KEY_REQUIRED, LogicKey, MAX_LOGIC_KEY_LEN, RouteSpec,
    ScenarioSpec, WorkflowCategory,
};
