use crate::common::{BUFFER_SIZE, HEIGHT, Rotation, WIDTH};
use crate::error::{Error, OledResult};
use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use log::{debug, trace};

// Control byte prefixes (Co = 0)
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// Largest GDDRAM write per I2C transfer, excluding the control byte.
const DATA_CHUNK: usize = 32;

#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum OledCommand {
    SetMemoryMode = 0x20,
    SetColumnAddress = 0x21,
    SetPageAddress = 0x22,
    SetStartLine = 0x40,
    SetContrast = 0x81,
    ChargePump = 0x8D,
    SegmentRemapNormal = 0xA0,
    SegmentRemapMirrored = 0xA1,
    ResumeFromRam = 0xA4,
    NormalDisplay = 0xA6,
    SetMultiplexRatio = 0xA8,
    DisplayOff = 0xAE,
    DisplayOn = 0xAF,
    ComScanIncrement = 0xC0,
    ComScanDecrement = 0xC8,
    SetDisplayOffset = 0xD3,
    SetClockDivide = 0xD5,
    SetPrecharge = 0xD9,
    SetComPins = 0xDA,
    SetVcomDetect = 0xDB,
}

pub struct Ssd1306 {
    i2c: I2cdev,
    address: u8,
    rotation: Rotation,
}

impl Ssd1306 {
    pub fn new(i2c: I2cdev, address: u8, rotation: Rotation) -> OledResult<Self> {
        let mut driver = Self {
            i2c,
            address,
            rotation,
        };
        driver.init()?;
        Ok(driver)
    }

    fn init(&mut self) -> OledResult<()> {
        debug!("OLED: init sequence starting (address 0x{:02X})", self.address);
        self.send_command(OledCommand::DisplayOff, &[])?;
        self.send_command(OledCommand::SetClockDivide, &[0x80])?;
        self.send_command(OledCommand::SetMultiplexRatio, &[(HEIGHT - 1) as u8])?;
        self.send_command(OledCommand::SetDisplayOffset, &[0x00])?;
        self.send_command(OledCommand::SetStartLine, &[])?;
        self.send_command(OledCommand::ChargePump, &[0x14])?;
        // Horizontal addressing: column pointer wraps into the next page
        self.send_command(OledCommand::SetMemoryMode, &[0x00])?;
        self.apply_rotation()?;
        self.send_command(OledCommand::SetComPins, &[0x12])?;
        self.send_command(OledCommand::SetContrast, &[0xCF])?;
        self.send_command(OledCommand::SetPrecharge, &[0xF1])?;
        self.send_command(OledCommand::SetVcomDetect, &[0x40])?;
        self.send_command(OledCommand::ResumeFromRam, &[])?;
        self.send_command(OledCommand::NormalDisplay, &[])?;
        self.send_command(OledCommand::DisplayOn, &[])?;
        debug!("OLED: init sequence complete");
        Ok(())
    }

    fn apply_rotation(&mut self) -> OledResult<()> {
        let (segment, com) = match self.rotation {
            Rotation::Normal => (
                OledCommand::SegmentRemapMirrored,
                OledCommand::ComScanDecrement,
            ),
            Rotation::UpsideDown => (
                OledCommand::SegmentRemapNormal,
                OledCommand::ComScanIncrement,
            ),
        };
        self.send_command(segment, &[])?;
        self.send_command(com, &[])
    }

    fn send_command(&mut self, command: OledCommand, args: &[u8]) -> OledResult<()> {
        trace!("OLED: send_command {:?} (0x{:02X})", command, command as u8);
        let mut bytes = Vec::with_capacity(args.len() + 2);
        bytes.push(CONTROL_COMMAND);
        bytes.push(command as u8);
        bytes.extend_from_slice(args);
        self.write(&bytes)
    }

    fn write(&mut self, bytes: &[u8]) -> OledResult<()> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|e| Error::Write {
                address: self.address,
                reason: format!("{e:?}"),
            })
    }

    pub fn set_contrast(&mut self, contrast: u8) -> OledResult<()> {
        self.send_command(OledCommand::SetContrast, &[contrast])
    }

    pub fn display_off(&mut self) -> OledResult<()> {
        self.send_command(OledCommand::DisplayOff, &[])
    }

    pub fn display_on(&mut self) -> OledResult<()> {
        self.send_command(OledCommand::DisplayOn, &[])
    }

    /// Push a whole frame into GDDRAM.
    pub fn flush(&mut self, buffer: &[u8]) -> OledResult<()> {
        debug_assert_eq!(buffer.len(), BUFFER_SIZE);
        self.send_command(OledCommand::SetColumnAddress, &[0, (WIDTH - 1) as u8])?;
        self.send_command(OledCommand::SetPageAddress, &[0, (HEIGHT / 8 - 1) as u8])?;

        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;
        for chunk in buffer.chunks(DATA_CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            self.write(&packet[..=chunk.len()])?;
        }
        trace!("OLED: flushed {} bytes", buffer.len());
        Ok(())
    }
}
