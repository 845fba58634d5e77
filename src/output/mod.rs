//! Output module for the user-agent record file
//!
//! This module handles:
//! - Writing the collected records as an indented JSON array
//! - Reading a record file back for the accuracy checker

mod json;

pub use json::{read_records, write_records};
