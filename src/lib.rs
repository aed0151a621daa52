//! Vectorised striped pairwise nucleotide aligner.
//!
//! Given a query sequence and a database of candidate sequences, computes
//! an affine-gap edit distance between the query and every database entry,
//! using the "striped"/"channelised" SIMD scheme: several independent
//! database sequences are tracked at once, one per SIMD lane, so the
//! aligner amortises vector width across sequences rather than columns of
//! a single pairwise alignment.
//!
//! This crate covers the aligner itself — codec, score matrix, query
//! profile, one-cell kernel, strip aligner, channel scheduler, direction
//! ring, backtracker, work dispatcher, and orchestrator. It does not parse
//! input files, load a database, or implement the clustering algorithm a
//! caller might build on top of repeated [`orchestrator::search_database`]
//! calls — those are the responsibility of the embedding application.
#![feature(portable_simd)]

pub mod backtrack;
pub mod codec;
pub mod config;
pub mod database;
pub mod dirring;
pub mod dispatch;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod orchestrator;
pub mod pool;
pub mod profile;
pub mod scheduler;
pub mod simd;

pub use backtrack::{backtrack, AlignOp, Traceback};
pub use codec::Nucleotide;
pub use config::AlignerConfig;
pub use database::{Database, InMemoryDatabase, PackedSequence};
pub use error::AlignError;
pub use orchestrator::search_database;
pub use pool::{InlinePool, RayonPool, WorkerPool};
pub use scheduler::{SearchHit, Target};
