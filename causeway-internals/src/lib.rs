#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`causeway`].
//!
//! # Overview
//!
//! This crate contains the low-level ownership and container primitives that
//! the [`causeway`] error library is built on. Everything that needs `unsafe`
//! lives here, so the invariants can be checked in one place.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`causeway`] crate,
//! which re-exports the public parts.
//!
//! # Architecture
//!
//! - **[`counter`]**: [`RefCount`], the atomic ownership counter, and the
//!   [`Released`] signal returned by a decrement.
//! - **[`counted`]**: The [`RefCounted`] contract (`add_ref` / `release`) and
//!   [`Counted<T>`], a heap header that makes any `T` reference counted.
//! - **[`ptr`]**: [`RefPtr<T>`], the nullable owning pointer over any
//!   [`RefCounted`] type.
//! - **[`list`]**: [`IntrusiveList<T>`], a doubly linked list whose links are
//!   stored next to each element inside a slot arena and which is addressed
//!   through generation-checked [`Handle`]s.
//!
//! # Safety Strategy
//!
//! The pointer in a [`RefPtr`] is only ever produced by [`RefPtr::new`] (which
//! boxes the value itself) or by the `unsafe` constructors whose contracts
//! require the same provenance. The counter is the only shared mutable state,
//! so `RefPtr<T>` is `Send + Sync` exactly when `T` is.
//!
//! The list does not use raw pointers at all: links are slot indices, and a
//! per-slot generation makes a stale [`Handle`] detectable instead of
//! dangling.
//!
//! [`causeway`]: https://docs.rs/causeway/latest/causeway/

extern crate alloc;

pub mod counted;
pub mod counter;
pub mod list;
pub mod ptr;
mod sync;

pub use counted::{Counted, RefCounted};
pub use counter::{RefCount, Released};
pub use list::{Handle, IntrusiveList};
pub use ptr::RefPtr;
