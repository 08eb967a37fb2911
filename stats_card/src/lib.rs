//! GitHub activity summaries
//!
//! # Overview
//!
//! Library computing a display-ready summary of a user's public GitHub activity.
//! The fetch layer supplies profile counts, repository records and a contribution calendar
//! (one `(date, count)` record per day, unordered); the library sorts the calendar,
//! derives the current and longest contribution streaks, ranks the top repository
//! languages and folds everything into a single flat [`summary::StatsSummary`] record
//! which a renderer turns into markup.
//!
//! The `api` feature exposes the domain records, the error type and the [`api::StatsClient`]
//! trait implemented by concrete fetch clients. The `summary` feature adds the streak
//! calculator and the aggregator on top of it.

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "summary")]
pub mod summary;
