use crate::config;
use crate::hal::pins;
use crate::math::ScaleBy;
use core::fmt;
use embedded_hal::serial;
use sampler::io::{Board, Clock, Fault, OutputValue, Sample};
use sampler::time::{self, Duration, Instant};
use stm32f1xx_hal::adc::Adc;
use stm32f1xx_hal::device::{ADC1, TIM3, USART1};
use stm32f1xx_hal::prelude::*;
use stm32f1xx_hal::serial::{Rx, Tx};
use stm32f1xx_hal::timer::{Ch, Channel, PwmHz, Tim3NoRemap};

pub type OutputPwm = PwmHz<TIM3, Tim3NoRemap, Ch<0>, pins::A6_TIM3C1>;

/// The peripherals one acquisition loop drives.
pub struct BluePill {
    /// Reads the monotonic timer; RTIC only exposes it as a free function
    now: fn() -> Instant,
    adc: Adc<ADC1>,
    input_pin: pins::A0_ADC1C0,
    output: OutputPwm,
    tx: Tx<USART1>,
    rx: Rx<USART1>,
}

impl BluePill {
    pub fn new(
        now: fn() -> Instant,
        adc: Adc<ADC1>,
        input_pin: pins::A0_ADC1C0,
        mut output: OutputPwm,
        tx: Tx<USART1>,
        rx: Rx<USART1>,
    ) -> Self {
        output.set_duty(Channel::C1, 0);
        output.enable(Channel::C1);

        Self {
            now,
            adc,
            input_pin,
            output,
            tx,
            rx,
        }
    }
}

impl Clock for BluePill {
    fn now(&mut self) -> Instant {
        (self.now)()
    }

    fn sleep(&mut self, duration: Duration) {
        // `wfi` would break debugging, and no wakeup is scheduled
        time::spin_for(self.now, duration);
    }
}

impl fmt::Write for BluePill {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            nb::block!(serial::Write::write(&mut self.tx, byte)).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

impl serial::Read<u8> for BluePill {
    type Error = stm32f1xx_hal::serial::Error;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        serial::Read::read(&mut self.rx)
    }
}

impl Board for BluePill {
    fn write_output(&mut self, value: OutputValue) -> Result<(), Fault> {
        let duty = self.output.get_max_duty().scale_by(value);
        self.output.set_duty(Channel::C1, duty);
        Ok(())
    }

    fn read_input(&mut self) -> Result<Sample, Fault> {
        let raw: u16 = match nb::block!(self.adc.read(&mut self.input_pin)) {
            Ok(raw) => raw,
            Err(()) => return Err(Fault::Input),
        };
        if raw >> config::adc::RESOLUTION_BITS != 0 {
            return Err(Fault::InvalidValue);
        }
        Ok(raw << config::adc::SAMPLE_SHIFT)
    }
}
