//! Podcastr Core
//!
//! Platform-agnostic episode types and helpers shared by the playback
//! library and the applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Episode`, `EpisodeId`
//! - **Data Source Records**: `EpisodeRecord` as served by the episode API
//! - **Catalog**: newest-first episode listing split into latest/others
//! - **Formatting**: `HH:MM:SS` durations and publish dates
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::{Catalog, CatalogOptions, Episode};
//! use std::time::Duration;
//!
//! let episode = Episode::new(
//!     "a-economia",
//!     "Como funciona a economia",
//!     "https://cdn.example.com/a-economia.m4a",
//!     Duration::from_secs(3981),
//! );
//!
//! let catalog = Catalog::from_episodes(vec![episode], CatalogOptions::default());
//! assert_eq!(catalog.playlist().len(), 1);
//! assert_eq!(podcastr_core::format_duration(3981), "01:06:21");
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod episode;
pub mod error;
pub mod format;

pub use catalog::{load_records, Catalog, CatalogOptions};
pub use episode::{Episode, EpisodeFile, EpisodeId, EpisodeRecord};
pub use error::{CoreError, Result};
pub use format::{format_duration, format_published_date};
