pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod controller;
pub mod form;
pub mod options;
pub mod render;
pub mod rewriter;
pub mod spinner;
