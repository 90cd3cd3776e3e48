pub mod settings_steps;
pub mod shell_steps;
