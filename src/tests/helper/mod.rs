pub mod cursor_input;
pub mod list_fixture;
