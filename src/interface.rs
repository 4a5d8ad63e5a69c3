//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two bus adapters
//! for talking to the SSD1306 controller:
//!
//! - [`SpiInterface`]: 4-wire serial bus. Chip select is owned by the
//!   [`SpiDevice`]; the **DC** pin selects command (low) or data (high).
//! - [`I2cInterface`]: 2-wire addressed bus. Every write starts with a
//!   control byte, `0x00` before each command byte and `0x40` before pixel
//!   data.
//!
//! Both adapters take an optional **RST** pin (output, active low). Use the
//! `new` constructors when the reset line is not wired, or `with_reset` to
//! hand the pin over.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_fb::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Create interface with SPI device, DC pin and reset pin
//! let mut interface = SpiInterface::with_reset(MockSpi, MockPin, MockPin);
//!
//! // Send a command burst: display on
//! let _ = interface.send_commands(&[0xAF]);
//!
//! // Send pixel data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default 7-bit I2C address (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit I2C address (SA0 high)
pub const ALTERNATE_I2C_ADDRESS: u8 = 0x3D;

/// Default number of pixel bytes per addressed-bus write
///
/// Matches the 32-byte transaction buffer common on small I2C stacks,
/// leaving room for the control byte.
pub const DEFAULT_DATA_CHUNK_SIZE: usize = 16;

/// Largest pixel chunk accepted by [`I2cInterface::set_data_chunk_size`]
pub const MAX_DATA_CHUNK_SIZE: usize = 32;

/// I2C control byte preceding a command byte (Co = 0, D/C# = 0)
pub const CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte preceding a data stream (Co = 0, D/C# = 1)
pub const CONTROL_DATA: u8 = 0x40;

/// Commands sent per addressed-bus write, each paired with a control byte
const COMMAND_BATCH: usize = 16;

/// Kind of bus the controller sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusKind {
    /// 4-wire serial bus with a data/command line
    Serial,
    /// 2-wire addressed bus with control-byte prefixes
    Addressed,
}

/// Trait for hardware interface to SSD1306 controller
///
/// This trait abstracts over the bus the controller is wired to,
/// allowing the [`Display`](crate::display::Display) to work with any
/// transport that can tell command bursts from data bursts.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or [`I2cInterface`]. Implement this
/// trait on your own type for other transports or for test doubles.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a sequence of command bytes as one command burst
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction or a GPIO write fails.
    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send pixel bytes as one data burst
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction or a GPIO write fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// The implementation must:
    /// 1. Set RST high and wait at least 1ms
    /// 2. Set RST low and wait at least 10ms
    /// 3. Set RST high
    ///
    /// Implementations without a reset line return `Ok(())` immediately.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Whether a reset line is available
    fn has_reset(&self) -> bool;

    /// Bus this interface drives
    fn bus_kind(&self) -> BusKind;

    /// Largest data burst the transport accepts in one transaction
    ///
    /// Only consulted on [`BusKind::Addressed`] buses.
    fn data_chunk_size(&self) -> usize {
        DEFAULT_DATA_CHUNK_SIZE
    }
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C transaction error (including I2C NACK)
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Placeholder for an unconnected reset line
///
/// Carries the error type of the pins it stands in for so interface error
/// types stay the same with or without a reset pin. It is never driven.
#[derive(Debug)]
pub struct NoResetPin<E = Infallible>(PhantomData<E>);

impl<E> NoResetPin<E> {
    /// Create the placeholder
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for NoResetPin<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: digital::Error> digital::ErrorType for NoResetPin<E> {
    type Error = E;
}

impl<E: digital::Error> OutputPin for NoResetPin<E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn pulse_reset<RST, D>(rst: &mut RST, delay: &mut D) -> InterfaceResult<(), RST::Error>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_high()?;
    delay.delay_ms(1);
    rst.set_low()?;
    delay.delay_ms(10);
    rst.set_high()
}

/// 4-wire serial interface for SSD1306
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`] (owns chip select)
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
}

impl<SPI, DC> SpiInterface<SPI, DC, NoResetPin<DC::Error>>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create an interface without a reset line
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc, rst: None }
    }
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
{
    /// Create an interface that owns the reset line
    pub fn with_reset(spi: SPI, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            dc,
            rst: Some(rst),
        }
    }

    /// Give back the SPI device and pins
    pub fn release(self) -> (SPI, DC, Option<RST>) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        match self.rst.as_mut() {
            Some(rst) => pulse_reset(rst, delay).map_err(InterfaceError::Pin),
            None => Ok(()),
        }
    }

    fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    fn bus_kind(&self) -> BusKind {
        BusKind::Serial
    }
}

/// 2-wire addressed interface for SSD1306
///
/// ## Type Parameters
///
/// * `I2C` - I2C bus implementing [`I2c`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct I2cInterface<I2C, RST> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Pixel bytes per data write
    chunk_size: usize,
}

impl<I2C> I2cInterface<I2C, NoResetPin>
where
    I2C: I2c,
{
    /// Create an interface without a reset line
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            rst: None,
            chunk_size: DEFAULT_DATA_CHUNK_SIZE,
        }
    }
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    /// Create an interface that owns the reset line
    pub fn with_reset(i2c: I2C, address: u8, rst: RST) -> Self {
        Self {
            i2c,
            address,
            rst: Some(rst),
            chunk_size: DEFAULT_DATA_CHUNK_SIZE,
        }
    }

    /// Set the number of pixel bytes per data write
    ///
    /// Clamped to `1..=MAX_DATA_CHUNK_SIZE`.
    pub fn set_data_chunk_size(&mut self, size: usize) -> &mut Self {
        self.chunk_size = size.clamp(1, MAX_DATA_CHUNK_SIZE);
        self
    }

    /// Get the device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C bus and reset pin
    pub fn release(self) -> (I2C, Option<RST>) {
        (self.i2c, self.rst)
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    I2C::Error: Debug,
    RST: OutputPin,
    RST::Error: Debug,
{
    type Error = InterfaceError<I2C::Error, RST::Error>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        let mut frame = [CONTROL_COMMAND; COMMAND_BATCH * 2];
        for batch in commands.chunks(COMMAND_BATCH) {
            for (slot, &command) in frame.chunks_exact_mut(2).zip(batch) {
                slot[0] = CONTROL_COMMAND;
                slot[1] = command;
            }
            self.i2c
                .write(self.address, &frame[..batch.len() * 2])
                .map_err(InterfaceError::Bus)?;
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        use embedded_hal::i2c::Operation;

        // Adjacent writes are sent back to back without a repeated start.
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(data)],
            )
            .map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        match self.rst.as_mut() {
            Some(rst) => pulse_reset(rst, delay).map_err(InterfaceError::Pin),
            None => Ok(()),
        }
    }

    fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    fn bus_kind(&self) -> BusKind {
        BusKind::Addressed
    }

    fn data_chunk_size(&self) -> usize {
        self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorKind as I2cErrorKind, NoAcknowledgeSource, Operation};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl digital::Error for MockError {
        fn kind(&self) -> digital::ErrorKind {
            digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> I2cErrorKind {
            I2cErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        DcLow,
        DcHigh,
        RstLow,
        RstHigh,
        DelayMs(u32),
    }

    #[derive(Default)]
    struct MockSpi {
        writes: Vec<Vec<u8>>,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let embedded_hal::spi::Operation::Write(bytes) = op {
                    self.writes.push(bytes.to_vec());
                }
            }
            Ok(())
        }
    }

    struct MockPin<'a> {
        events: &'a core::cell::RefCell<Vec<Event>>,
        low: Event,
        high: Event,
    }

    impl digital::ErrorType for MockPin<'_> {
        type Error = MockError;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.events.borrow_mut().push(self.low);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.events.borrow_mut().push(self.high);
            Ok(())
        }
    }

    struct MockDelay<'a> {
        events: &'a core::cell::RefCell<Vec<Event>>,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.events.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        nack: bool,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.nack {
                return Err(MockError);
            }
            let mut frame = Vec::new();
            for op in operations {
                if let Operation::Write(bytes) = op {
                    frame.extend_from_slice(bytes);
                }
            }
            self.writes.push((address, frame));
            Ok(())
        }
    }

    #[test]
    fn test_spi_command_and_data_select_dc() {
        let events = core::cell::RefCell::new(Vec::new());
        let dc = MockPin {
            events: &events,
            low: Event::DcLow,
            high: Event::DcHigh,
        };
        let mut interface = SpiInterface::new(MockSpi::default(), dc);
        assert!(!interface.has_reset());
        assert_eq!(interface.bus_kind(), BusKind::Serial);

        interface.send_commands(&[0x21, 0, 127]).unwrap();
        interface.send_data(&[1, 2, 3, 4]).unwrap();

        assert_eq!(*events.borrow(), [Event::DcLow, Event::DcHigh]);
        let (spi, _, _) = interface.release();
        assert_eq!(spi.writes, [alloc::vec![0x21, 0, 127], alloc::vec![1, 2, 3, 4]]);
    }

    #[test]
    fn test_spi_reset_pulse_order() {
        let events = core::cell::RefCell::new(Vec::new());
        let dc = MockPin {
            events: &events,
            low: Event::DcLow,
            high: Event::DcHigh,
        };
        let rst = MockPin {
            events: &events,
            low: Event::RstLow,
            high: Event::RstHigh,
        };
        let mut delay = MockDelay { events: &events };
        let mut interface = SpiInterface::with_reset(MockSpi::default(), dc, rst);
        assert!(interface.has_reset());

        interface.reset(&mut delay).unwrap();
        assert_eq!(
            *events.borrow(),
            [
                Event::RstHigh,
                Event::DelayMs(1),
                Event::RstLow,
                Event::DelayMs(10),
                Event::RstHigh,
            ]
        );
    }

    #[test]
    fn test_spi_reset_without_pin_is_noop() {
        let events = core::cell::RefCell::new(Vec::new());
        let dc = MockPin {
            events: &events,
            low: Event::DcLow,
            high: Event::DcHigh,
        };
        let mut delay = MockDelay { events: &events };
        let mut interface = SpiInterface::new(MockSpi::default(), dc);
        interface.reset(&mut delay).unwrap();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_i2c_commands_interleave_control_bytes() {
        let mut interface = I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);
        assert_eq!(interface.bus_kind(), BusKind::Addressed);
        interface.send_commands(&[0x81, 0xCF]).unwrap();

        let (i2c, _) = interface.release();
        assert_eq!(i2c.writes, [(0x3C, alloc::vec![0x00, 0x81, 0x00, 0xCF])]);
    }

    #[test]
    fn test_i2c_long_command_sequence_is_batched() {
        let mut interface = I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);
        let commands: Vec<u8> = (0..20).collect();
        interface.send_commands(&commands).unwrap();

        let (i2c, _) = interface.release();
        assert_eq!(i2c.writes.len(), 2);
        assert_eq!(i2c.writes[0].1.len(), COMMAND_BATCH * 2);
        assert_eq!(i2c.writes[1].1, [0x00, 16, 0x00, 17, 0x00, 18, 0x00, 19]);
    }

    #[test]
    fn test_i2c_data_is_prefixed() {
        let mut interface = I2cInterface::new(MockI2c::default(), ALTERNATE_I2C_ADDRESS);
        interface.send_data(&[0xAA, 0x55]).unwrap();

        let (i2c, _) = interface.release();
        assert_eq!(i2c.writes, [(0x3D, alloc::vec![0x40, 0xAA, 0x55])]);
    }

    #[test]
    fn test_i2c_nack_is_reported() {
        let mut interface = I2cInterface::new(
            MockI2c {
                nack: true,
                ..MockI2c::default()
            },
            DEFAULT_I2C_ADDRESS,
        );
        assert!(matches!(
            interface.send_commands(&[0xAF]),
            Err(InterfaceError::Bus(MockError))
        ));
        assert!(matches!(
            interface.send_data(&[0x00]),
            Err(InterfaceError::Bus(MockError))
        ));
    }

    #[test]
    fn test_i2c_chunk_size_is_clamped() {
        let mut interface = I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);
        assert_eq!(interface.data_chunk_size(), DEFAULT_DATA_CHUNK_SIZE);

        interface.set_data_chunk_size(0);
        assert_eq!(interface.data_chunk_size(), 1);

        interface.set_data_chunk_size(1_000);
        assert_eq!(interface.data_chunk_size(), MAX_DATA_CHUNK_SIZE);
    }
}
