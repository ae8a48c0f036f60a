//! High-level ADXL345 device driver implementation.

use crate::codec::{decode_axes, encode_read, encode_write};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::{ErrorReport, Event, EventQueue, TerminalReason};
use crate::interface::spi::SpiInterface;
use crate::interface::Adxl345Interface;
use crate::log;
use crate::params::{IdentityPolicy, OutputDataRate, Range};
use crate::registers::{
    BwRate,
    DataFormat,
    PowerControl,
    Register,
    RegisterAddress,
    AXIS_DATA_LEN,
    EXPECTED_DEVICE_ID,
};
use crate::sample::SampleTriple;
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

/// Lifecycle of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// No transport bound yet.
    Uninitialized,
    /// A transport is bound; bring-up has not completed.
    Bound,
    /// Bring-up sequence in progress.
    SettingUp,
    /// Bring-up completed; samples may be taken.
    Sampling,
    /// The transport link was lost. Only [`Adxl345::bind`] leaves this state.
    Disconnected,
    /// The transport declared itself incompatible. Only [`Adxl345::bind`] leaves this state.
    Incompatible,
}

/// High-level synchronous driver for the ADXL345 accelerometer.
///
/// The driver owns a single transport and must be driven from one caller at a
/// time. Every operation is a blocking round-trip over the bus.
pub struct Adxl345<IFACE, D> {
    interface: Option<IFACE>,
    delay: D,
    config: Config,
    state: DriverState,
    events: EventQueue,
}

impl<IFACE, D> Adxl345<IFACE, D> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates an unbound driver with the given configuration.
    ///
    /// `delay` provides the settle wait applied after each register write.
    pub fn new(config: Config, delay: D) -> Self {
        Self {
            interface: None,
            delay,
            config,
            state: DriverState::Uninitialized,
            events: EventQueue::new(),
        }
    }

    /// Attaches a transport, returning the previously bound one if any.
    ///
    /// Leaves any terminal state; bring-up must be run again with [`Adxl345::setup`].
    pub fn bind(&mut self, interface: IFACE) -> Option<IFACE> {
        log::log_info!("transport bound");
        self.state = DriverState::Bound;
        self.interface.replace(interface)
    }

    /// Consumes the driver and returns its parts.
    pub fn release(self) -> (Option<IFACE>, D, Config) {
        (self.interface, self.delay, self.config)
    }

    /// Provides mutable access to the bound interface.
    pub fn interface_mut(&mut self) -> Option<&mut IFACE> {
        self.interface.as_mut()
    }

    // ==================================================================
    // == Terminal Signals ==============================================
    // ==================================================================
    /// Records that the transport link was lost and hands the transport back.
    pub fn disconnected(&mut self) -> Option<IFACE> {
        self.terminate(TerminalReason::Disconnected)
    }

    /// Records that the transport cannot drive this device and hands it back.
    pub fn incompatible(&mut self) -> Option<IFACE> {
        self.terminate(TerminalReason::Incompatible)
    }

    fn terminate(&mut self, reason: TerminalReason) -> Option<IFACE> {
        if matches!(self.state, DriverState::Disconnected | DriverState::Incompatible) {
            return self.interface.take();
        }

        log::log_warn!("driver terminated: {}", reason);
        self.state = match reason {
            TerminalReason::Disconnected => DriverState::Disconnected,
            TerminalReason::Incompatible => DriverState::Incompatible,
        };
        self.events.push(Event::Terminal(reason));
        self.interface.take()
    }

    // ==================================================================
    // == Configuration & Status ========================================
    // ==================================================================
    /// Returns the current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Range currently programmed into `DATA_FORMAT`.
    pub fn range(&self) -> Range {
        self.config.range
    }

    /// Output rate currently programmed into `BW_RATE`.
    pub fn output_rate(&self) -> OutputDataRate {
        self.config.output_rate
    }

    /// Conversion factor from raw counts to g for the configured range.
    pub fn multiplier(&self) -> f32 {
        self.config.range.multiplier()
    }

    // ==================================================================
    // == Events ========================================================
    // ==================================================================
    /// Removes and returns the oldest pending event.
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.pop()
    }

    /// Drains every pending event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain()
    }

    /// Read-only view of the event queue.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }
}

impl<SPI, D> Adxl345<SpiInterface<SPI>, D>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Creates a driver already bound to an SPI device.
    pub fn new_spi(spi: SPI, config: Config, delay: D) -> Self {
        let mut driver = Self::new(config, delay);
        driver.bind(SpiInterface::new(spi));
        driver
    }

    /// Binds an SPI device, returning the previously bound one if any.
    pub fn bind_spi(&mut self, spi: SPI) -> Option<SPI> {
        self.bind(SpiInterface::new(spi)).map(SpiInterface::release)
    }

    /// Releases the driver, returning the SPI device (if bound) and configuration.
    pub fn release_spi(self) -> (Option<SPI>, Config) {
        let (iface, _, config) = self.release();
        (iface.map(SpiInterface::release), config)
    }
}

impl<IFACE, D, CommE> Adxl345<IFACE, D>
where
    IFACE: Adxl345Interface<Error = CommE>,
    D: DelayNs,
{
    // ==================================================================
    // == Bring-up ======================================================
    // ==================================================================
    /// Runs the bring-up sequence and enters [`DriverState::Sampling`].
    ///
    /// In order: read `DEVID` and settle, report a mismatch, report the identity, then write
    /// `DATA_FORMAT` (range), `POWER_CTL` (measure) and `BW_RATE` (output rate).
    /// Under [`IdentityPolicy::Report`] a mismatch does not stop the sequence.
    ///
    /// On failure the driver returns to [`DriverState::Bound`] so the caller can retry.
    pub fn setup(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;
        if self.interface.is_none() {
            return Err(Error::NotReady);
        }

        self.state = DriverState::SettingUp;
        match self.run_setup() {
            Ok(()) => {
                self.state = DriverState::Sampling;
                log::log_info!("setup complete");
                Ok(())
            }
            Err(err) => {
                self.state = DriverState::Bound;
                Err(err)
            }
        }
    }

    fn run_setup(&mut self) -> Result<(), CommE> {
        let id = self.read_device_id()?;
        self.settle();
        let mismatch = id != EXPECTED_DEVICE_ID;
        if mismatch {
            log::log_warn!("unexpected device id {=u8:#x}", id);
            self.events.push(Event::Error(ErrorReport::DeviceIdMismatch {
                expected: EXPECTED_DEVICE_ID,
                found: id,
            }));
        }
        self.events.push(Event::Identity(id));

        if mismatch && self.config.identity_policy == IdentityPolicy::Abort {
            return Err(Error::DeviceIdMismatch(id));
        }

        self.write_typed(DataFormat::new().with_range(self.config.range))?;
        self.write_typed(PowerControl::new().with_measure(true))?;
        self.write_typed(BwRate::new().with_rate(self.config.output_rate))?;
        Ok(())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the raw `DEVID` register.
    pub fn read_device_id(&mut self) -> Result<u8, CommE> {
        let mut id = [0u8; 1];
        self.read_many(RegisterAddress::DevId, &mut id)?;
        Ok(id[0])
    }

    // ==================================================================
    // == Range & Rate ==================================================
    // ==================================================================
    /// Writes `DATA_FORMAT` with `range` and switches the multiplier to it.
    ///
    /// The stored range only changes once the write went through.
    pub fn set_range(&mut self, range: Range) -> Result<(), CommE> {
        self.write_typed(DataFormat::new().with_range(range))?;
        self.config.range = range;
        log::log_debug!("range set to +/-{=u8} g", range.scale_g());
        Ok(())
    }

    /// Sets the range from a span in g.
    ///
    /// Values other than 2, 4, 8 and 16 push an [`ErrorReport::UnsupportedRange`]
    /// event and return `Ok` without touching the bus or the configuration.
    pub fn set_range_g(&mut self, g: i32) -> Result<(), CommE> {
        match Range::from_g(g) {
            Some(range) => self.set_range(range),
            None => {
                self.events.push(Event::Error(ErrorReport::UnsupportedRange(g)));
                Ok(())
            }
        }
    }

    /// Writes `BW_RATE` with `rate`.
    pub fn set_output_rate(&mut self, rate: OutputDataRate) -> Result<(), CommE> {
        self.write_typed(BwRate::new().with_rate(rate))?;
        self.config.output_rate = rate;
        log::log_debug!("output rate set to {=u32} mHz", rate.millihertz());
        Ok(())
    }

    /// Sets the output rate from a datasheet value in millihertz.
    ///
    /// Values missing from the datasheet table push an
    /// [`ErrorReport::UnsupportedOutputRate`] event and return `Ok` unchanged.
    pub fn set_output_rate_millihertz(&mut self, millihertz: u32) -> Result<(), CommE> {
        match OutputDataRate::from_millihertz(millihertz) {
            Some(rate) => self.set_output_rate(rate),
            None => {
                self.events
                    .push(Event::Error(ErrorReport::UnsupportedOutputRate(millihertz)));
                Ok(())
            }
        }
    }

    /// Reads back `DATA_FORMAT`.
    pub fn read_data_format(&mut self) -> Result<DataFormat, CommE> {
        self.read_typed()
    }

    /// Reads back `BW_RATE`.
    pub fn read_bw_rate(&mut self) -> Result<BwRate, CommE> {
        self.read_typed()
    }

    /// Reads back `POWER_CTL`.
    pub fn read_power_control(&mut self) -> Result<PowerControl, CommE> {
        self.read_typed()
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads all six axis-data registers in one burst.
    ///
    /// The raw sample is returned and also pushed as [`Event::Data`]. Only
    /// valid after [`Adxl345::setup`] succeeded.
    pub fn sample(&mut self) -> Result<SampleTriple, CommE> {
        if self.state != DriverState::Sampling {
            return Err(Error::NotReady);
        }

        let mut raw = [0u8; AXIS_DATA_LEN];
        self.read_many(RegisterAddress::DataX0, &mut raw)?;

        let sample = decode_axes(raw);
        self.events.push(Event::Data(sample));
        Ok(sample)
    }

    // ==================================================================
    // == Internal Bus Helpers ==========================================
    // ==================================================================
    fn bus(&mut self) -> Result<&mut IFACE, CommE> {
        self.interface.as_mut().ok_or(Error::NotReady)
    }

    fn read_many(&mut self, register: RegisterAddress, buf: &mut [u8]) -> Result<(), CommE> {
        let frame = encode_read(register, buf.len()).map_err(Error::Frame)?;
        self.bus()?
            .transact(frame.write_bytes(), buf)
            .map_err(Error::from)
    }

    fn read_typed<R: Register>(&mut self) -> Result<R, CommE> {
        let mut raw = [0u8; 1];
        self.read_many(R::ADDRESS, &mut raw)?;
        Ok(R::from(raw[0]))
    }

    fn write_register(&mut self, register: RegisterAddress, value: u8) -> Result<(), CommE> {
        let frame = encode_write(register, &[value]).map_err(Error::Frame)?;
        self.bus()?
            .transact(frame.write_bytes(), &mut [])
            .map_err(Error::from)?;
        log::log_trace!("wrote {=u8:#x} to {=u8:#x}", value, register.addr());

        self.settle();
        Ok(())
    }

    fn settle(&mut self) {
        if self.config.settle_delay_ms > 0 {
            self.delay.delay_ms(self.config.settle_delay_ms);
        }
    }

    fn write_typed<R: Register>(&mut self, value: R) -> Result<(), CommE> {
        self.write_register(R::ADDRESS, value.into())
    }
}
