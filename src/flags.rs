use bitflags::bitflags;

bitflags! {
    /// Container header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// The original data was valid UTF-8. Informational only; the
        /// payload is decoded as bytes either way.
        const TEXT = 0b_0000_0001;

        /// A footer holding the original length (mod 2^32) follows the payload.
        const LENGTH = 0b_0000_0010;
    }
}
