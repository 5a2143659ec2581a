//! Registration form controller for the community landing page.
//!
//! DESIGN
//! ======
//! The library holds everything with a contract: field validation, the
//! submission state machine, modal lifecycle, and the sinks a registration
//! can be delivered to. The `signup` binary is a terminal presentation
//! layer over it.

pub mod config;
pub mod form;
pub mod sink;
