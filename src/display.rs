//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{self, ScrollDirection};
use crate::config::{self, Config, Dimensions, Rotation};
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::{BusKind, DisplayInterface};
use crate::mode::DrawMode;
use crate::rotation::{self, Run};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Buffered driver for SSD1306
///
/// Owns the bus interface and an off-chip [`Framebuffer`]. Drawing calls
/// only touch the framebuffer; [`flush`](Self::flush) pushes it to the
/// controller.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Current rotation (starts at `config.rotation`)
    rotation: Rotation,
    /// Off-chip copy of display RAM
    framebuffer: Framebuffer,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance with a cleared framebuffer
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            rotation: config.rotation,
            framebuffer: Framebuffer::new(config.dimensions),
            config,
        }
    }

    /// Reset (optionally) and initialize the controller
    ///
    /// When `reset` is true and the interface has a reset line, the line is
    /// pulsed first. The initialization sequence is then sent as one
    /// command burst. The framebuffer is left untouched.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D, reset: bool) -> DisplayResult<I> {
        if reset && self.interface.has_reset() {
            log::debug!("ssd1306: pulsing reset line");
            self.interface.reset(delay).map_err(Error::Interface)?;
        }

        let dims = self.config.dimensions;
        log::debug!(
            "ssd1306: initializing {}x{} panel, {:?} supply",
            dims.width,
            dims.height,
            self.config.supply_mode
        );
        self.send_commands(&command::init_sequence(
            dims.height,
            self.config.supply_mode,
        ))
    }

    /// Send the whole framebuffer to the controller
    ///
    /// Sets the column and page windows to the full panel, then sends the
    /// pixel bytes. Serial buses get a single data burst; addressed buses
    /// get one burst per [`data_chunk_size`](DisplayInterface::data_chunk_size)
    /// bytes. The first failing burst aborts the flush.
    pub fn flush(&mut self) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        self.send_commands(&command::column_address(0, dims.width - 1))?;
        self.send_commands(&command::page_address(0, dims.pages() - 1))?;

        let bus = self.interface.bus_kind();
        let bytes = self.framebuffer.as_bytes();
        log::trace!("ssd1306: flushing {} bytes over {:?} bus", bytes.len(), bus);
        match bus {
            BusKind::Serial => self.interface.send_data(bytes).map_err(Error::Interface),
            BusKind::Addressed => {
                let chunk_size = self.interface.data_chunk_size().max(1);
                for chunk in bytes.chunks(chunk_size) {
                    self.interface.send_data(chunk).map_err(Error::Interface)?;
                }
                Ok(())
            }
        }
    }

    /// Zero the framebuffer
    ///
    /// The panel keeps showing the old content until the next flush.
    pub fn clear_buffer(&mut self) {
        self.framebuffer.clear();
    }

    /// Apply `mode` to the pixel at user-space `(x, y)`
    ///
    /// Points outside the rotated panel are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, mode: DrawMode) {
        let size = self.size();
        if !(0..size.width as i32).contains(&x) || !(0..size.height as i32).contains(&y) {
            return;
        }
        let (width, height) = self.physical_size();
        let (bx, by) = rotation::transform_point(x, y, width, height, self.rotation);
        self.framebuffer.set_pixel(bx, by, mode);
    }

    /// Apply `mode` to a horizontal run of `w` pixels starting at user-space `(x, y)`
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, mode: DrawMode) {
        let size = self.size();
        if !(0..size.height as i32).contains(&y) {
            return;
        }
        let Some((x, w)) = clip_span(x, w, size.width as i32) else {
            return;
        };
        let (width, height) = self.physical_size();
        let run = rotation::transform_hline(x, y, w, width, height, self.rotation);
        self.fill_run(run, mode);
    }

    /// Apply `mode` to a vertical run of `h` pixels starting at user-space `(x, y)`
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, mode: DrawMode) {
        let size = self.size();
        if !(0..size.width as i32).contains(&x) {
            return;
        }
        let Some((y, h)) = clip_span(y, h, size.height as i32) else {
            return;
        };
        let (width, height) = self.physical_size();
        let run = rotation::transform_vline(x, y, h, width, height, self.rotation);
        self.fill_run(run, mode);
    }

    fn fill_run(&mut self, run: Run, mode: DrawMode) {
        match run {
            Run::Row { x, y, len } => self.framebuffer.fill_row_run(x, y, len, mode),
            Run::Column { x, y, len } => self.framebuffer.fill_column_run(x, y, len, mode),
        }
    }

    /// Read the pixel at user-space `(x, y)`, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let size = self.size();
        if !(0..size.width as i32).contains(&x) || !(0..size.height as i32).contains(&y) {
            return None;
        }
        let (width, height) = self.physical_size();
        let (bx, by) = rotation::transform_point(x, y, width, height, self.rotation);
        self.framebuffer.pixel(bx, by)
    }

    /// Switch between normal and inverted display
    ///
    /// Inversion happens in the controller; the framebuffer is unchanged.
    pub fn invert(&mut self, enable: bool) -> DisplayResult<I> {
        log::debug!("ssd1306: invert {}", enable);
        let opcode = if enable {
            command::INVERT_DISPLAY
        } else {
            command::NORMAL_DISPLAY
        };
        self.send_commands(&[opcode])
    }

    /// Dim the panel to zero contrast, or restore the configured contrast
    pub fn dim(&mut self, enable: bool) -> DisplayResult<I> {
        let value = if enable {
            0
        } else {
            command::contrast(self.config.dimensions.height, self.config.supply_mode)
        };
        log::debug!("ssd1306: contrast {:#04x}", value);
        self.send_commands(&command::set_contrast(value))
    }

    /// Turn the panel on or off
    ///
    /// Controller RAM survives while the panel is off.
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        log::debug!("ssd1306: display {}", if on { "on" } else { "off" });
        let opcode = if on {
            command::DISPLAY_ON
        } else {
            command::DISPLAY_OFF
        };
        self.send_commands(&[opcode])
    }

    /// Start a continuous horizontal scroll over pages `start..=stop`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidScrollRange` if `start > stop` or `stop` is
    /// past the last page.
    pub fn start_scroll_horizontal(
        &mut self,
        direction: ScrollDirection,
        start: u8,
        stop: u8,
    ) -> DisplayResult<I> {
        self.check_scroll_range(start, stop)?;
        log::debug!(
            "ssd1306: horizontal scroll {:?} pages {}..={}",
            direction,
            start,
            stop
        );
        self.send_commands(&command::horizontal_scroll(direction, start, stop))
    }

    /// Start a continuous diagonal scroll over pages `start..=stop`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidScrollRange` if `start > stop` or `stop` is
    /// past the last page.
    pub fn start_scroll_diagonal(
        &mut self,
        direction: ScrollDirection,
        start: u8,
        stop: u8,
    ) -> DisplayResult<I> {
        self.check_scroll_range(start, stop)?;
        log::debug!(
            "ssd1306: diagonal scroll {:?} pages {}..={}",
            direction,
            start,
            stop
        );
        self.send_commands(&command::diagonal_scroll(
            direction,
            start,
            stop,
            self.config.dimensions.height,
        ))
    }

    /// Stop any active scroll
    ///
    /// Controller RAM may be shifted afterwards; flush to restore it.
    pub fn stop_scroll(&mut self) -> DisplayResult<I> {
        log::debug!("ssd1306: stop scroll");
        self.send_commands(&command::stop_scroll())
    }

    fn check_scroll_range(&self, start: u8, stop: u8) -> DisplayResult<I> {
        if start > stop || stop >= self.config.dimensions.pages() {
            return Err(Error::InvalidScrollRange { start, stop });
        }
        Ok(())
    }

    /// Send a command burst to the display controller
    fn send_commands(&mut self, commands: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_commands(commands)
            .map_err(Error::Interface)
    }

    fn physical_size(&self) -> (i32, i32) {
        let dims = self.config.dimensions;
        (dims.width as i32, dims.height as i32)
    }

    /// Get physical display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get the drawable size for the current rotation
    pub fn size(&self) -> Dimensions {
        config::rotated(self.config.dimensions, self.rotation)
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the rotation used by subsequent drawing calls
    ///
    /// Pixels already in the framebuffer stay where they are.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        log::debug!("ssd1306: rotation {:?}", rotation);
        self.rotation = rotation;
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Consume the driver and give back the interface
    pub fn release(self) -> I {
        self.interface
    }
}

/// Clip the span `start..start + len` to `0..limit`
fn clip_span(start: i32, len: i32, limit: i32) -> Option<(i32, i32)> {
    if len <= 0 {
        return None;
    }
    let end = start.saturating_add(len).min(limit);
    let start = start.max(0);
    (start < end).then(|| (start, end - start))
}
