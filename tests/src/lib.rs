//! # CipherExchange Test Suite
//!
//! Unified test crate containing cross-component integration flows:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── exchange_flows.rs    # client → bus → listener round trips
//!     └── listener_policies.rs # reply-or-silence policy matrix
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p exchange-tests
//!
//! # By category
//! cargo test -p exchange-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
