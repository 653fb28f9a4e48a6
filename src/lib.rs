//! Priority forests for Rust
//!
//! This crate provides a Fibonacci-heap style priority forest with handle-based
//! `decrease`, plus the tooling used to study it: a structural audit, read-only
//! node views and an instrumented strategy that counts structural work.
//!
//! # Features
//!
//! - **Priority forest**: O(1) amortized insert and decrease; O(log n) amortized extract-min
//! - **Strategies**: every attach, detach, decrease and bucket-count decision goes
//!   through a [`Strategy`], so variants plug in without touching the forest
//! - **Audit**: checks heap order, links, ranks, marks and size of a live forest
//! - **Experiments**: step counting, naive decrease and the star workload
//!
//! # Example
//!
//! ```rust
//! use priority_forest::PriorityForest;
//!
//! let mut forest = PriorityForest::new();
//! let handle1 = forest.insert(5, "item1");
//! let handle2 = forest.insert(3, "item2");
//! forest.decrease(handle1, 1).unwrap();
//! assert_eq!(forest.peek(), Some((&1, &"item1")));
//! assert_eq!(forest.extract_min(), Ok(("item1", 1)));
//! assert_eq!(forest.priority(handle2), Some(&3));
//! ```

pub mod audit;
pub mod experiment;
pub mod forest;
pub mod inspect;
pub mod node;
pub mod rank;
pub mod strategy;
pub mod traits;

// Re-export the main types for convenience
pub use forest::PriorityForest;
pub use node::{NodeKey, Nodes};
pub use strategy::{Standard, Strategy};
pub use traits::{DecreaseKeyHeap, ForestError, Handle, Heap};
