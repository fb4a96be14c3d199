//! Main module for rtf library functionality

pub mod lexing;
pub mod loader;
pub mod source;
pub mod token;
