#[macro_use] extern crate log;
extern crate thiserror;

pub mod checker;
