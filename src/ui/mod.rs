//! UI components and layouts.
//!
//! This module provides Leptos SSR components for rendering the application shell,
//! following ShadCN-UI design principles.
//!
//! # Structure
//!
//! - [`app`]: Page shell and the `render_*` entry points used by the server
//! - [`components`]: Reusable ShadCN-style UI components
//! - [`chat`]: Chat panel, transcript, suggestions and input
//! - [`markdown`]: Assistant answer renderer

pub mod app;
pub mod chat;
pub mod components;
pub mod markdown;

pub use app::{
    render_page, render_panel, render_session_expired, render_settled_panel, render_theme_toggle,
    render_transcript,
};
