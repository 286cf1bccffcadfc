pub mod console;

pub use console::ConsoleEventPort;
