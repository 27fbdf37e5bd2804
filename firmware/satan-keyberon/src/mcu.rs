use rp_pico::hal;

use hal::{pac, timer::Alarm};

use embedded_hal::PwmPin;
use fugit::ExtU32;

use usb_device::bus::UsbBusAllocator;
use usb_device::device::{UsbDeviceBuilder, UsbVidPid};

use crate::common::{self, AnyPin, BacklightPwm, UsbClass, UsbDevice};

/// Matrix scan period.
pub const TICK_US: u32 = 1_000;

/// System and USB clocks from the Pico crystal. The watchdog is returned
/// unstarted, it keeps running under a debugger.
pub fn init_clocks(
    watchdog: pac::WATCHDOG,
    xosc: pac::XOSC,
    clocks: pac::CLOCKS,
    pll_sys: pac::PLL_SYS,
    pll_usb: pac::PLL_USB,
    resets: &mut pac::RESETS,
) -> (hal::Watchdog, hal::clocks::ClocksManager) {
    let mut watchdog = hal::watchdog::Watchdog::new(watchdog);
    watchdog.pause_on_debug(false);

    let Ok(clocks) = hal::clocks::init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        xosc,
        clocks,
        pll_sys,
        pll_usb,
        resets,
        &mut watchdog,
    ) else {
        defmt::panic!("clock setup failed");
    };
    (watchdog, clocks)
}

/// Alarm firing every `TICK_US`, the task it is bound to reschedules it.
pub fn init_scan_alarm(
    timer: pac::TIMER,
    resets: &mut pac::RESETS,
    clocks: &hal::clocks::ClocksManager,
) -> hal::timer::Alarm0 {
    let mut timer = hal::timer::Timer::new(timer, resets, clocks);
    let Some(mut alarm) = timer.alarm_0() else {
        defmt::panic!("alarm 0 taken");
    };
    let _ = alarm.schedule(TICK_US.micros());
    alarm.enable_interrupt();
    alarm
}

/// Keyboard HID class and device with the Satan's USB identity.
pub fn init_usb(bus: &'static UsbBusAllocator<hal::usb::UsbBus>) -> (UsbDevice, UsbClass) {
    let class = UsbClass::new(keyberon::keyboard::Keyboard::new(()), bus);
    let device = UsbDeviceBuilder::new(bus, UsbVidPid(common::VID, common::PID))
        .manufacturer(common::MANUFACTURER)
        .product(common::PRODUCT)
        .serial_number(env!("CARGO_PKG_VERSION"))
        .build();
    (device, class)
}

/// Backlight on gpio16, driven by PWM slice 0 channel A.
pub fn init_backlight(
    pwm: pac::PWM,
    resets: &mut pac::RESETS,
    gp16: AnyPin<hal::gpio::bank0::Gpio16>,
) -> BacklightPwm {
    let slices = hal::pwm::Slices::new(pwm, resets);
    let mut slice = slices.pwm0;
    slice.set_ph_correct();
    slice.enable();

    let mut channel = slice.channel_a;
    channel.output_to(gp16);
    channel.set_duty(0);
    channel.enable();
    channel
}
