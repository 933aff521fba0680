pub fn dump_to_log() {
    info!(
        "\n\
        Debugging flags:\n\
        - LOG_TICKS: {}\n\
        - LOG_LATE_TICKS: {}\n\
        - LOG_SPECTRUM: {}\n\
        Sampling:\n\
        - PERIOD:   {} us\n\
        - OVERHEAD: {} us\n\
        Buffer:\n\
        - LEN: {}\n\
        Signal:\n\
        - PERIOD_SECS: {}\n\
        - AMPLITUDE:   {}\n\
        Commands:\n\
        - MAX_LINE_LEN: {}\n\
        - MAX_ARGS:     {}\n\
        - MAX_HANDLERS: {}\n\
        ",
        debug::LOG_TICKS,
        debug::LOG_LATE_TICKS,
        debug::LOG_SPECTRUM,
        sample::PERIOD.to_micros(),
        sample::OVERHEAD.to_micros(),
        buffer::LEN,
        signal::PERIOD_SECS,
        signal::AMPLITUDE,
        command::MAX_LINE_LEN,
        command::MAX_ARGS,
        command::MAX_HANDLERS,
    );
}

/// Debugging flags
pub mod debug {
    /// Log the output and input value of every tick (very noisy)
    pub const LOG_TICKS: bool = false;
    /// Log ticks that arrive after their period already elapsed
    pub const LOG_LATE_TICKS: bool = true;
    /// Log the magnitude spectrum of every cycle, in addition to the report
    pub const LOG_SPECTRUM: bool = false;
}

/// Sampling cadence
pub mod sample {
    use crate::time::Duration;

    /// Time between ticks
    pub const PERIOD: Duration = Duration::micros(1000);

    /// Fixed per-tick cost (loop bookkeeping, I/O latency) subtracted from each wait.
    pub const OVERHEAD: Duration = Duration::micros(60);

    const _: () = assert!(OVERHEAD.ticks() < PERIOD.ticks());
}

/// Acquisition buffer
pub mod buffer {
    /// Samples per acquisition cycle, which is also the FFT length
    pub const LEN: usize = 16;
    const _: () = assert!(LEN.is_power_of_two());
}

/// Generated output waveform
pub mod signal {
    /// Period of the output cosine, in seconds
    pub const PERIOD_SECS: f64 = 5.0;

    /// Peak output value; must fit the output device's 16-bit range
    pub const AMPLITUDE: f64 = 65025.0;

    const _: () = assert!(AMPLITUDE <= u16::MAX as f64);
}

/// Command channel
pub mod command {
    /// Longest accepted command line, excluding the newline
    pub const MAX_LINE_LEN: usize = 128;

    /// Numeric arguments accepted per command
    pub const MAX_ARGS: usize = 4;

    /// Operations that can be registered in one command set
    pub const MAX_HANDLERS: usize = 8;

    /// Capacity of an encoded reply line
    pub const MAX_REPLY_LEN: usize = 96;
}
