//! The sampling loop: `N` scheduled ticks per cycle, then transform, report and command poll.

use crate::command::{self, Command, CommandSet, Line, LineReader, Reply};
use crate::config;
use crate::fft;
use crate::io::{Board, Fault, OutputValue, Sample};
use crate::schedule::Scheduler;
use crate::signal::Signal;
use crate::time::{self, Duration, Instant};
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Loop state visible to command handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Completed acquisition cycles
    pub cycles: u32,
    /// Ticks skipped because of an I/O fault, over the whole run
    pub faults: u32,
    /// Ticks skipped in the most recent cycle
    pub last_cycle_faults: u32,
    pub last_input: Sample,
    pub last_output: OutputValue,
    /// Set by a handler to end the loop at the next cycle boundary
    pub stop_requested: bool,
}

/// Shutdown request, observed once per cycle boundary.
///
/// Can be set from an interrupt handler or another thread while the loop runs.
pub struct StopSignal {
    requested: AtomicBool,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Result of one acquisition cycle.
pub struct Cycle<const N: usize> {
    pub spectrum: [f64; N],
    /// Ticks whose exchange failed; their buffer slots hold the previous cycle's value
    pub faulted: [bool; N],
}

impl<const N: usize> Cycle<N> {
    pub fn fault_count(&self) -> usize {
        self.faulted.iter().filter(|&&f| f).count()
    }
}

/// The loop context: buffer, timing state, and everything carried between cycles.
pub struct Acquisition<const N: usize> {
    buffer: [Sample; N],
    spectrum: [f64; N],
    scheduler: Scheduler,
    signal: Signal,
    start: Instant,
    status: Status,
    lines: LineReader<{ config::command::MAX_LINE_LEN }>,
}

impl<const N: usize> Acquisition<N> {
    const LEN_IS_POWER_OF_TWO: () = assert!(N.is_power_of_two(), "buffer length must be a power of two");

    /// Loop with the configured period, overhead and signal, starting now.
    pub fn new(start: Instant) -> Self {
        Self::with_settings(
            start,
            config::sample::PERIOD,
            config::sample::OVERHEAD,
            Signal::default(),
        )
    }

    pub fn with_settings(start: Instant, period: Duration, overhead: Duration, signal: Signal) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LEN_IS_POWER_OF_TWO;
        Self {
            buffer: [0; N],
            spectrum: [0.0; N],
            scheduler: Scheduler::new(start, period, overhead),
            signal,
            start,
            status: Status::default(),
            lines: LineReader::new(),
        }
    }

    pub fn buffer(&self) -> &[Sample; N] {
        &self.buffer
    }

    pub fn spectrum(&self) -> &[f64; N] {
        &self.spectrum
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// One tick: wait, generate and write the output, read the input into slot `i`.
    fn tick<B: Board>(&mut self, board: &mut B, i: usize) -> Result<(), Fault> {
        let t = self.scheduler.wait(board);

        let output = self.signal.sample(time::seconds_since(self.start, t));
        board.write_output(output)?;
        self.status.last_output = output;

        let input = board.read_input()?;
        self.status.last_input = input;
        self.buffer[i] = input;

        if config::debug::LOG_TICKS {
            trace!("Tick {}: output {} input {}", i, output, input);
        }

        Ok(())
    }

    /// Fill the buffer over `N` ticks, then transform it.
    pub fn run_cycle<B: Board>(&mut self, board: &mut B) -> Cycle<N> {
        let mut faulted = [false; N];

        for i in 0..N {
            if let Err(fault) = self.tick(board, i) {
                warn!("Tick {} skipped: {}", i, fault);
                faulted[i] = true;
            }
        }

        let bins = match fft::transform(&fft::complex_from_samples(&self.buffer)) {
            Ok(bins) => bins,
            Err(_) => unreachable!("buffer length is checked at construction"),
        };
        self.spectrum = fft::magnitudes(&bins);

        if config::debug::LOG_SPECTRUM {
            debug!("Spectrum: {}", self.spectrum);
        }

        let cycle = Cycle {
            spectrum: self.spectrum,
            faulted,
        };

        #[allow(clippy::cast_possible_truncation)]
        let faults = cycle.fault_count() as u32;
        self.status.last_cycle_faults = faults;
        self.status.faults = self.status.faults.saturating_add(faults);
        self.status.cycles = self.status.cycles.wrapping_add(1);

        cycle
    }

    /// Write the per-cycle report block.
    pub fn write_report<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            "Output: {} - Input: {}",
            self.status.last_output, self.status.last_input
        )?;

        out.write_str("Buffer: [")?;
        for (i, s) in self.buffer.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{}", s)?;
        }
        out.write_str("]\n")?;

        out.write_str("Spectrum: [")?;
        for (i, m) in self.spectrum.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{:.3}", m)?;
        }
        out.write_str("]\n")?;

        writeln!(out, "Faults: {}", self.status.last_cycle_faults)?;
        out.write_char('\n')
    }

    /// Handle at most one pending command line, without waiting for input.
    pub fn poll_commands<B: Board>(
        &mut self,
        board: &mut B,
        commands: &CommandSet<Status, { config::command::MAX_HANDLERS }>,
    ) -> fmt::Result {
        match self.lines.poll(board) {
            None => Ok(()),
            Some(Line::Complete(line)) => commands.handle_line(line, &mut self.status, board),
            Some(Line::Dropped) => {
                warn!("Dropped overlong or undecodable command line");
                command::write_malformed(board)
            }
        }
    }

    /// Run cycles until `stop` (or a `stop` command) is seen at a cycle boundary.
    pub fn run<B: Board>(
        &mut self,
        board: &mut B,
        commands: &CommandSet<Status, { config::command::MAX_HANDLERS }>,
        stop: &StopSignal,
    ) -> Status {
        info!("Starting acquisition: {} samples per cycle", N);

        loop {
            self.run_cycle(board);

            if self.write_report(board).is_err() {
                warn!("Report write failed");
            }

            if self.poll_commands(board, commands).is_err() {
                warn!("Command reply write failed");
            }

            if stop.is_requested() || self.status.stop_requested {
                info!("Stopping after {} cycles", self.status.cycles);
                break self.status;
            }
        }
    }
}

/// `{"op":"ping"}` -> `{"result":"pong"}`
pub fn ping(_: &mut Status, _: &Command<'_>) -> Reply {
    Reply::new("pong")
}

/// `{"op":"status"}` -> cycles, total faults, latest input and output
pub fn status(status: &mut Status, _: &Command<'_>) -> Reply {
    #[allow(clippy::cast_possible_wrap)]
    let values = [
        status.cycles as i32,
        status.faults as i32,
        i32::from(status.last_input),
        i32::from(status.last_output),
    ];
    Reply::with_values("status", &values)
}

/// `{"op":"stop"}` ends the loop at the next cycle boundary
pub fn stop(status: &mut Status, _: &Command<'_>) -> Reply {
    status.stop_requested = true;
    Reply::new("stopping")
}

impl CommandSet<Status, { config::command::MAX_HANDLERS }> {
    /// Command set with `ping`, `status` and `stop` registered.
    pub fn with_builtins() -> Self {
        let mut commands = Self::new();
        for (op, handler) in [
            ("ping", ping as command::Handler<Status>),
            ("status", status),
            ("stop", stop),
        ] {
            if commands.register(op, handler).is_err() {
                unreachable!("builtins fit in an empty command set");
            }
        }
        commands
    }
}
