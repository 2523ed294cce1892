//! Memory Chunker - turn transcripts and audio into JSONL memory chunks
//!
//! A thin desktop shell around an external worker process: it picks files,
//! asks where to save the result, remembers the directories used, and runs
//! the worker with normalized arguments.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Requests, path normalization, preferences, config and errors
//! - **Application**: Request handlers and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (worker process, dialogs, files)
//! - **Bridge**: The confined operation surface and its JSON-lines server
//! - **CLI**: Command-line interface, argument parsing and output

pub mod application;
pub mod bridge;
pub mod cli;
pub mod domain;
pub mod infrastructure;
