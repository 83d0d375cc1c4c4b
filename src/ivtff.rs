//! Main module for ivtff library functionality

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod metadata;
pub mod pages;
pub mod parser;
pub mod testing;
pub mod transcription;
