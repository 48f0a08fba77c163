//! Coris Digital agency site.
//!
//! The crate renders seven views (home, conversion web design and five
//! service detail pages) in French or English, captures leads through an
//! email relay and answers the AI planner through a text completion service.

pub mod app;
pub mod config;
pub mod email;
pub mod forms;
pub mod html;
pub mod i18n;
pub mod pages;
pub mod router;
pub mod security;
pub mod server;
pub mod strategy;
