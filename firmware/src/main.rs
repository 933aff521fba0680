#![no_main]
#![no_std]
#![allow(clippy::let_and_return)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::ptr_as_ptr
)]

use defmt_rtt as _; // global logger
use stm32f1xx_hal as _; // memory layout

use panic_probe as _; // panicking-behavior

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

mod board;
mod config;
mod hal;
mod math;

#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true)]
mod app {
    use crate::board::BluePill;
    use crate::config;
    use crate::hal::pins;
    use dwt_systick_monotonic::DwtSystick;
    use sampler::acquisition::{Acquisition, StopSignal};
    use sampler::command::CommandSet;
    use sampler::io::Clock;
    use sampler::time::Instant;
    use stm32f1xx_hal::adc::Adc;
    use stm32f1xx_hal::prelude::*;
    use stm32f1xx_hal::serial::{Config, Serial};
    use stm32f1xx_hal::timer::Timer;

    /// Requests a stop at the next cycle boundary; nothing sets it on this board yet.
    static STOP: StopSignal = StopSignal::new();

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        board: BluePill,
    }

    #[init]
    fn init(mut cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("Dumping config...");

        config::dump_to_log();
        sampler::config::dump_to_log();

        defmt::info!("Starting init...");

        let mut afio = cx.device.AFIO.constrain();
        let mut flash = cx.device.FLASH.constrain();
        let mut gpioa = cx.device.GPIOA.split();
        let rcc = cx.device.RCC.constrain();

        defmt::info!("Configuring clocks...");

        let clocks = rcc
            .cfgr
            .use_hse(config::clk::HSE_FREQ)
            .sysclk(config::clk::SYSCLK)
            .pclk1(config::clk::PCLK1)
            .pclk2(config::clk::PCLK2)
            .adcclk(config::clk::ADCCLK)
            .freeze(&mut flash.acr);

        assert!(config::clk::SYSCLK == clocks.sysclk());
        assert!(config::clk::PCLK1 == clocks.pclk1());
        assert!(config::clk::PCLK2 == clocks.pclk2());
        assert!(config::clk::ADCCLK == clocks.adcclk());

        defmt::info!("Configuring ADC1 for single conversions...");

        let mut adc1 = Adc::adc1(cx.device.ADC1, clocks);
        adc1.set_sample_time(config::adc::SAMPLE);

        let adc1_ch0: pins::A0_ADC1C0 = gpioa.pa0.into_analog(&mut gpioa.crl);

        defmt::info!("Configuring output timer...");

        let tim3_ch1: pins::A6_TIM3C1 = gpioa.pa6.into_alternate_push_pull(&mut gpioa.crl);

        let output = Timer::new(cx.device.TIM3, &clocks).pwm_hz(
            tim3_ch1,
            &mut afio.mapr,
            config::output::PWM_FREQ,
        );

        defmt::info!("Configuring serial port...");

        let tx_pin: pins::A9_USART1_TX = gpioa.pa9.into_alternate_push_pull(&mut gpioa.crh);
        let rx_pin: pins::A10_USART1_RX = gpioa.pa10;

        let (tx, rx) = Serial::new(
            cx.device.USART1,
            (tx_pin, rx_pin),
            &mut afio.mapr,
            Config::default().baudrate(config::serial::BAUD_RATE.bps()),
            &clocks,
        )
        .split();

        defmt::info!("Configuring monotonic timer...");

        let mono = DwtMono::new(
            &mut cx.core.DCB,
            cx.core.DWT,
            cx.core.SYST,
            clocks.sysclk().to_Hz(),
        );

        let board = BluePill::new(now, adc1, adc1_ch0, output, tx, rx);

        defmt::info!("Finished init.");

        (Shared {}, Local { board }, init::Monotonics(mono))
    }

    /// This provides the clock for the sampling loop's waits.
    #[monotonic(binds = SysTick, default = true)]
    type DwtMono = DwtSystick<{ config::clk::SYSCLK_HZ }>;

    /// Monotonic time in microseconds; the `extend` feature keeps the cycle counter from wrapping.
    fn now() -> Instant {
        Instant::from_ticks(u64::from(
            monotonics::now().duration_since_epoch().to_micros(),
        ))
    }

    /// The acquisition loop runs here, at the lowest priority, paced by busy-waiting on the monotonic.
    #[idle(local = [board])]
    fn idle(cx: idle::Context) -> ! {
        let board = cx.local.board;

        let mut acquisition = Acquisition::<{ sampler::config::buffer::LEN }>::new(board.now());
        let commands = CommandSet::with_builtins();

        let status = acquisition.run(board, &commands, &STOP);

        defmt::info!("Acquisition stopped: {}", status);

        loop {
            // Note that using `wfi` here breaks debugging,
            // so if desired we should only do that in release mode.
            continue;
        }
    }
}
