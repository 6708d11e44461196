//! Elasticity Desk core: the price-elasticity score table, the price change
//! simulator, and the views a dashboard front end renders from them.

pub mod buyer_fee;
pub mod command;
pub mod config;
pub mod curve;
pub mod dashboard;
pub mod error;
pub mod presentation;
pub mod score_table;
pub mod simulation;
pub mod types;
