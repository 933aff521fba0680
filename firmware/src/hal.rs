//! Pin assignments on the STM32F103 "blue pill".

#[allow(non_camel_case_types)]
pub mod pins {
    use stm32f1xx_hal::gpio::{Alternate, Analog, Floating, Input, Pin, PushPull};

    /// Sampled input voltage
    pub type A0_ADC1C0 = Pin<'A', 0, Analog>;

    /// Generated output, filtered externally to an analog level
    pub type A6_TIM3C1 = Pin<'A', 6, Alternate<PushPull>>;

    /// Report and command channel
    pub type A9_USART1_TX = Pin<'A', 9, Alternate<PushPull>>;
    pub type A10_USART1_RX = Pin<'A', 10, Input<Floating>>;
}
