pub mod buffer;
pub mod dispatch;
pub mod parser;
