pub mod config;
pub mod entities;
pub mod payload;
pub mod project;
pub mod service;
pub mod tag;
pub mod task;
pub mod web;
