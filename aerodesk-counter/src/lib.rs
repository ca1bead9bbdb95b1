pub mod console;
pub mod session_loop;

pub use console::ConsoleInput;
