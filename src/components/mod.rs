//! Reusable presentational components.
//!
//! ARCHITECTURE
//! ============
//! Components render data handed to them by pages; none of them calls the
//! backend or touches the session.

pub mod field_error;
pub mod footer;
pub mod notice_bar;
pub mod result_card;
pub mod spinner;
