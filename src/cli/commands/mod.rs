pub mod catalog;
pub mod settings;
pub mod stakeholders;
pub mod submit;
pub mod take;

pub use catalog::{CatalogCommands, catalog_command};
pub use settings::{SettingsCommands, settings_command};
pub use stakeholders::{questions_command, stakeholders_command};
pub use submit::{SubmitCommands, submit_command};
pub use take::{TakeCommands, take_command};
