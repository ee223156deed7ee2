/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The generation session coordinator (session.rs)
/// - Bounded history persistence (history.rs)

pub mod data;
pub mod history;
pub mod session;
