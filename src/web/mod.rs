//! HTTP endpoint for document matching.
//!
//! A thin JSON surface over the matching engine for front ends that already
//! hold the document text and the image listing.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! comp-linker serve
//!
//! # Custom port, bind to all interfaces
//! comp-linker serve --port 3000 --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/match` - Match `doc_text` against `images` (JSON body)
//! - `POST /api/segments` - Parse `doc_text` only
//! - `GET /api/health` - Liveness check

pub mod server;
