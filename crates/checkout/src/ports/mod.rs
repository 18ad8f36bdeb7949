//! The two outside parties checkout drives: the orders backend and the
//! payment widget.

pub mod orders;
pub mod widget;
