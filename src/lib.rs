//! Fixed-period sampling loop with a radix-2 FFT spectrum report.
//!
//! Each acquisition cycle drives `N` ticks: wait for the next sampling period,
//! write one generated output sample, read one input sample into the buffer.
//! Once the buffer is full it is transformed, its magnitude spectrum is reported,
//! and any pending command line is handled before the next cycle starts.
//!
//! Hardware is reached only through the traits in [`io`], so the same loop runs
//! on the microcontroller (see `firmware/`) and against mocks on the host.

#![cfg_attr(not(test), no_std)]
#![allow(
    clippy::let_and_return,
    clippy::needless_range_loop,
    clippy::type_complexity
)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::ptr_as_ptr
)]

#[macro_use]
mod fmt;

pub mod acquisition;
pub mod command;
pub mod config;
pub mod fft;
pub mod io;
pub mod math;
pub mod schedule;
pub mod signal;
pub mod time;
