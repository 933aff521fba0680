#![allow(dead_code)]

use embedded_hal::serial;
use sampler::io::{Board, Clock, Fault, OutputValue, Sample};
use sampler::time::{Duration, Instant};
use std::collections::VecDeque;
use std::fmt;

/// Board whose clock only advances when slept on or when I/O is performed.
pub struct MockBoard {
    pub now: u64,
    /// microseconds charged for each output write and each input read
    pub io_cost: u64,
    pub inputs: VecDeque<Result<Sample, Fault>>,
    pub output_faults: VecDeque<usize>,
    pub outputs: Vec<OutputValue>,
    pub writes: usize,
    pub tick_times: Vec<u64>,
    pub sleeps: Vec<u64>,
    pub rx: VecDeque<u8>,
    pub tx: String,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            now: 0,
            io_cost: 20,
            inputs: VecDeque::new(),
            output_faults: VecDeque::new(),
            outputs: Vec::new(),
            writes: 0,
            tick_times: Vec::new(),
            sleeps: Vec::new(),
            rx: VecDeque::new(),
            tx: String::new(),
        }
    }

    pub fn with_inputs(inputs: &[Sample]) -> Self {
        let mut board = Self::new();
        board.inputs = inputs.iter().map(|&s| Ok(s)).collect();
        board
    }

    pub fn send_line(&mut self, line: &str) {
        self.rx.extend(line.as_bytes());
        self.rx.push_back(b'\n');
    }
}

impl Clock for MockBoard {
    fn now(&mut self) -> Instant {
        Instant::from_ticks(self.now)
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration.to_micros());
        self.now += duration.to_micros();
    }
}

impl fmt::Write for MockBoard {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.push_str(s);
        Ok(())
    }
}

impl serial::Read<u8> for MockBoard {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl Board for MockBoard {
    fn write_output(&mut self, value: OutputValue) -> Result<(), Fault> {
        self.tick_times.push(self.now);
        let index = self.writes;
        self.writes += 1;
        self.now += self.io_cost;
        if self.output_faults.front() == Some(&index) {
            self.output_faults.pop_front();
            return Err(Fault::Output);
        }
        self.outputs.push(value);
        Ok(())
    }

    fn read_input(&mut self) -> Result<Sample, Fault> {
        self.now += self.io_cost;
        self.inputs.pop_front().unwrap_or(Err(Fault::Input))
    }
}
