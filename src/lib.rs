//! FitNutrition Library
//!
//! Nutrition target calculation plus the accounts and profiles that feed it.

pub mod auth;
pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
