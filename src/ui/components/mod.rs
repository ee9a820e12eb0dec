//! ShadCN-style reusable UI components.
//!
//! This module provides a set of composable, accessible UI components
//! inspired by shadcn/ui, rendered via Leptos SSR.
//!
//! # Components
//!
//! - [`Button`]: Primary icon button
//! - [`Avatar`]: User avatar with fallback
//! - [`SourceChip`]: Citation link with favicon
//! - [`SystemMessage`]: Footer notices
//! - [`ThemeToggle`]: Light/dark switch
//! - [`ThinkingLoader`]: Pending-answer indicator
//! - `*Icon`: SVG icon components

mod avatar;
mod button;
mod icons;
mod loader;
mod source;
mod system_message;
mod theme_toggle;

pub use avatar::{Avatar, assistant_avatar_url};
pub use button::Button;
pub use icons::*;
pub use loader::ThinkingLoader;
pub use source::{SourceChip, SourceLabel};
pub use system_message::{SystemMessage, SystemMessageVariant};
pub use theme_toggle::ThemeToggle;
