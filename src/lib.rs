//! Question answering over a small internal knowledge base.
//!
//! Questions are embedded, matched against a pre-built snapshot of document
//! chunks, and routed to one of three generation pathways depending on
//! retrieval confidence and the caller's augmentation toggle.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;
