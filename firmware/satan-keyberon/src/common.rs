use rp_pico::hal;

use hal::gpio::{
    DynPinId, FunctionNull, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp,
};
use hal::pwm;
use hal::usb::UsbBus;

use keyberon::matrix::Matrix;
use keyberon::{hid::HidClass, keyboard::Keyboard};

pub type UsbClass = HidClass<'static, UsbBus, Keyboard<()>>;
pub type UsbDevice = usb_device::device::UsbDevice<'static, UsbBus>;

/// Shared V-USB keyboard id, see
/// https://github.com/obdev/v-usb/blob/master/usbdrv/USB-IDs-for-free.txt
pub const VID: u16 = 0x16c0;
pub const PID: u16 = 0x27db;
pub const PRODUCT: &str = "satan";
pub const MANUFACTURER: &str = "GH60 Satan";

/// A gpio straight out of `Pins::new`.
pub type AnyPin<I> = Pin<I, FunctionNull, PullDown>;
/// Column, read with the pull-up on.
pub type InputPin = Pin<DynPinId, FunctionSioInput, PullUp>;
/// Row, driven low while scanned.
pub type OutputPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

pub type KeyMatrix<const C: usize, const R: usize> = Matrix<InputPin, OutputPin, C, R>;

pub type BacklightPwm = pwm::Channel<pwm::Slice<pwm::Pwm0, pwm::FreeRunning>, pwm::A>;
