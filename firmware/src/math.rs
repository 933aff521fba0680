/// Fixed point scaling.
///
/// The `factor` argument represents scaling from 0 (at `0`) to 1 (at `T::MAX`).
pub trait ScaleBy<Factor> {
    fn scale_by(self, by: Factor) -> Self;
}

impl ScaleBy<u16> for u16 {
    fn scale_by(self, by: u16) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let scaled = ((u32::from(self) * u32::from(by)) >> u16::BITS) as u16;
        scaled
    }
}
