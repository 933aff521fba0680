pub fn dump_to_log() {
    defmt::info!(
        "\n\
        Clocks:\n\
        - HSE_FREQ: {} Hz\n\
        - SYSCLK:   {} Hz\n\
        - PCLK1:    {} Hz\n\
        - PCLK2:    {} Hz\n\
        - ADCCLK:   {} Hz\n\
        ADC:\n\
        - RESOLUTION_BITS: {}\n\
        Output:\n\
        - PWM_FREQ: {} Hz\n\
        Serial:\n\
        - BAUD_RATE: {}\n\
        ",
        clk::HSE_FREQ.to_Hz(),
        clk::SYSCLK.to_Hz(),
        clk::PCLK1.to_Hz(),
        clk::PCLK2.to_Hz(),
        clk::ADCCLK.to_Hz(),
        adc::RESOLUTION_BITS,
        output::PWM_FREQ.to_Hz(),
        serial::BAUD_RATE,
    );
}

/// Clock configuration
///
/// See clock tree in https://www.st.com/resource/en/datasheet/stm32f103c8.pdf
pub mod clk {
    use fugit::Rate;

    /// Use external oscillator (required to get max 72MHz sysclk)
    pub const HSE_FREQ: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(8);

    /// PLLMUL @ x9 (max 72MHz)
    pub const SYSCLK: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);
    pub const SYSCLK_HZ: u32 = SYSCLK.to_Hz();

    /// APB1 prescaler @ /2 (max 36MHz), clocks TIM3
    pub const PCLK1: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(36);
    /// APB2 prescaler @ /1 (max 72MHz), clocks USART1 and ADC1
    pub const PCLK2: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(72);

    /// ADC prescaler @ /6 (max 14MHz, min 600kHz)
    pub const ADCCLK: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::MHz(12);
}

/// ADC configuration
pub mod adc {
    use stm32f1xx_hal::adc::SampleTime;

    /// One conversion takes 12.5 + 55.5 cycles at ADCCLK, well inside one tick
    const SAMPLE_CYC_X10: usize = 555;
    pub const SAMPLE: SampleTime = match SAMPLE_CYC_X10 {
        15 => SampleTime::T_1,
        75 => SampleTime::T_7,
        135 => SampleTime::T_13,
        285 => SampleTime::T_28,
        415 => SampleTime::T_41,
        555 => SampleTime::T_55,
        715 => SampleTime::T_71,
        2395 => SampleTime::T_239,
        _ => panic!("Invalid sample cycles"),
    };

    pub const RESOLUTION_BITS: u32 = 12;

    /// Shift that widens a raw conversion to the full 16-bit sample range
    pub const SAMPLE_SHIFT: u32 = u16::BITS - RESOLUTION_BITS;
}

/// Generated output
pub mod output {
    use fugit::Rate;

    /// PWM carrier; the duty cycle carries the output value
    pub const PWM_FREQ: Rate<u32, 1, 1> = Rate::<u32, 1, 1>::kHz(10);
}

/// Report and command channel
pub mod serial {
    pub const BAUD_RATE: u32 = 115_200;
}
