//! Saleschat - client-side session manager for real-time sales conversation analysis.
//!
//! This crate maintains a scripted customer/agent conversation, a declared
//! conversation goal, and the asynchronous analysis cycle against a remote
//! Conversation Analysis Service reached over a websocket connection.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
