//! Structured exceptions.
//!
//! Structex provides try/catch/finally semantics with catch clauses that match on a closed
//! hierarchy of [exception kinds](ExceptionType). Exceptions are [records](Exception) carrying a
//! kind, a message and the location they were thrown from. They unwind the stack like Rust
//! panics, but are only ever caught by this crate, never printed by the panic hook, and matched by
//! kind rather than by type.
//!
//!
//! # Usage
//!
//! Throw with [`throw_new!`], [`throw_new`] or [`throw`], and catch with a [`Try`] statement:
//!
//! ```rust
//! use structex::{ExceptionType, Try, throw_new};
//!
//! fn parse_port(input: &str) -> u16 {
//!     match input.parse() {
//!         Ok(port) => port,
//!         Err(_) => throw_new!(Format, "`{}` is not a port number", input),
//!     }
//! }
//!
//! let port = Try::new(|| parse_port("http"))
//!     .catch(ExceptionType::Format, |_| 80)
//!     .run();
//! assert_eq!(port, 80);
//! ```
//!
//! A catch clause for a kind also handles all of its descendants, and the clause for the root
//! [`ExceptionType::Exception`] handles everything. Clauses are tested in order; the first match
//! wins. A finalizer set with [`Try::finally`] runs exactly once however the statement is left.
//!
//! To get a [`Result`] or an [`Outcome`] instead, use [`r#try`] or [`attempt`]. To re-throw a
//! caught exception while keeping its original location, use [`throw_again`].
//!
//!
//! # Unhandled exceptions
//!
//! An exception thrown while no try region is active on the current thread cannot be handled.
//! Instead of unwinding, the process reports the exception kind, message, file and line on stderr
//! and exits with [`UNHANDLED_EXIT_CODE`]. This can be changed with [`config::init`] or the
//! environment, see [`config`].
//!
//!
//! # Primitives
//!
//! [`Try`] and the other helpers are built on [`TryFrame`], which exposes each step of a try
//! region (entering, catch clauses, finally, exit) separately, and keeps the per-thread
//! [scope stack](depth) in sync with the regions active on the call stack.
//!
//!
//! # Threads
//!
//! Every thread has its own scope stack. Exceptions never cross threads by themselves: a thread
//! spawned inside a try region starts with no active regions, so exceptions it doesn't catch
//! itself are unhandled.

#![cfg_attr(thread_local = "attribute", feature(thread_local))]
#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    clippy::pedantic,
    clippy::allow_attributes,
    clippy::arithmetic_side_effects,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    clippy::clone_on_ref_ptr,
    clippy::decimal_literal_representation,
    clippy::default_numeric_fallback,
    clippy::deref_by_slicing,
    clippy::else_if_without_else,
    clippy::empty_drop,
    clippy::empty_enum_variants_with_brackets,
    clippy::empty_structs_with_brackets,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::format_push_string,
    clippy::infinite_loop,
    clippy::mem_forget,
    clippy::missing_assert_message,
    clippy::missing_inline_in_public_items,
    clippy::mixed_read_write_in_expression,
    clippy::needless_raw_strings,
    clippy::pub_without_shorthand,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::redundant_type_annotations,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::semicolon_inside_block,
    clippy::separated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::string_lit_chars_any,
    clippy::string_to_string,
    clippy::tests_outside_test_module,
    clippy::try_err,
    clippy::unneeded_field_pattern,
    clippy::unused_result_ok,
    clippy::wildcard_enum_match_arm,
)]

extern crate alloc;

mod macros;

mod api;
mod backend;
pub mod config;
mod error;
mod exception;
mod fatal;
mod frame;
mod kind;
mod stack;
mod throw;
mod verdict;

pub use api::{OrThrow, Outcome, Try, attempt, r#try};
pub use config::{FatalAction, FatalConfig, UNHANDLED_EXIT_CODE};
pub use error::ConfigError;
pub use exception::{Exception, is_instance_of};
pub use frame::{ScopeState, TryFrame};
pub use kind::{ExceptionType, matches};
pub use stack::{FrameId, depth, top};
pub use throw::{throw, throw_again, throw_at, throw_new};
pub use verdict::Verdict;
