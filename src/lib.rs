//! # Studio Site
//!
//! A static site generator for a design studio's portfolio. Content lives in
//! a headless CMS (Contentful); the generator pulls it once per build, shapes
//! it into view models, and writes plain HTML for the home, about, projects
//! index and per-project pages.
//!
//! # Architecture: Fetch, Assemble, Render
//!
//! ```text
//! 1. Fetch     ContentSource  →  typed entries     (CMS or JSON export → serde types)
//! 2. Assemble  Routes         →  PageData          (one immutable bundle per route)
//! 3. Render    props + maud   →  dist/             (view models → HTML)
//! ```
//!
//! Every route's assembler asks the build's [`cache::ContentCache`] for the
//! content it needs. The cache is single-flight per key: when six project
//! pages assemble at once, the shared project template is still fetched
//! exactly once, and the others wait for that fetch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | `ContentSource` trait, Contentful Delivery API client, local JSON export, link resolution |
//! | [`cache`] | Per-build single-flight memoizing fetch cache |
//! | [`routes`] | Page data assemblers, next-project selection, project path enumeration |
//! | [`props`] | Pure mappers from content fields to component props (text colour, images, cards) |
//! | [`components`] | Maud presentation components and their pre-bound wrappers |
//! | [`generate`] | Concurrent route assembly, page rendering, writing the site |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Typed CMS schema shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Cache Per Build
//!
//! The cache is an explicit value created at the start of a build and
//! dropped at its end. There is no eviction, no expiry and nothing on disk:
//! content is consistent within one build and fresh for the next. Failed
//! fetches are not stored, so a retry inside the same build gets a new
//! attempt.
//!
//! ## Typed Schema at the Boundary
//!
//! Raw CMS JSON is resolved (links replaced by the entries they point at)
//! and deserialized into [`types`] right where it enters the crate. Page
//! kinds are a sum type, [`types::PageFields`], chosen by content type id.
//! Everything downstream pattern-matches on `Option` instead of probing
//! for empty values.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, auto-escaped, and with no template directory to ship.
//!
//! ## Offline Builds
//!
//! [`content::LocalSource`] answers the same queries from a JSON export
//! with the delivery API's shape, so the whole site builds in CI and in
//! tests without credentials.

pub mod cache;
pub mod components;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod props;
pub mod routes;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
