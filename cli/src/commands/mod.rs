pub mod diff;
pub mod fetch;
pub mod skill;

pub use diff::{handle_diff_command, DiffArgs};
pub use fetch::{handle_fetch_command, FetchArgs};
pub use skill::{handle_skill_command, SkillCommands};
