//! UI module - command line front end

pub mod cli;
