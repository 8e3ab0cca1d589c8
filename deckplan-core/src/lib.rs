#![doc = "deckplan-core: slide plan assembly and bounded asset caches."]

//! This crate turns unstructured text into a validated, renderer-ready slide
//! plan and produces the illustrative assets a renderer needs for each slide.
//!
//! - [`parse`], [`mapper`], [`validate`] and [`pipeline`]: markdown or
//!   [`proposal`] input to a capacity-checked [`model::PresentationData`].
//! - [`icons`] and [`images`]: LRU icon rendering and a TTL/size-bounded disk
//!   cache for generated illustrations, with [`retry`] for the network path.
//! - [`contract`]: the trait seams for generators and rasterisers.
//!
//! Output serialisation to a slide-deck file format is left to the renderer.

pub mod assets;
pub mod classify;
pub mod config;
pub mod contract;
pub mod error;
pub mod icons;
pub mod images;
pub mod mapper;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod proposal;
pub mod retry;
pub mod validate;
