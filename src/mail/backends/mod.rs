pub mod console;
pub mod smtp;
