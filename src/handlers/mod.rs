//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Index page and health check endpoint
//! - `voices` - Voice and model catalog
//! - `speak` - Single and multi-speaker synthesis
//! - `generate` - Topic-driven content generation

pub mod api;
pub mod generate;
pub mod speak;
pub mod voices;
