//! Idea Intake - Guided intake conversation for new product ideas
//!
//! This crate walks a user from a raw business problem through solution,
//! features and user stories, then hands a summarised package to the
//! delivery team once the user supplies contact details and approves.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
