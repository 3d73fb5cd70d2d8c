pub mod document;
pub mod illustration;
pub mod mail;
pub mod message;
pub mod output;
