use core::cell::RefCell;

use embassy_sync::{
    blocking_mutex::{raw::RawMutex, Mutex},
    signal::Signal,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{
    prelude::{EsbRadio, EsbStatus},
    Nrf24Error, Nrfc, RadioEvents, TxOutcome,
};

/// The longest wait for the outcome of a single transmission attempt (in milliseconds).
const ATTEMPT_WINDOW_MS: u32 = 200;

/// A [`Nrfc`] that can be shared between the interrupt path and the application.
///
/// Every operation runs with the radio locked, so register sequences issued by
/// [`SharedNrfc::on_interrupt()`] never interleave with the caller's.
/// The mutex kind `M` decides what "locked" means:
/// use [`CriticalSectionRawMutex`](embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex)
/// when `on_interrupt()` is called from an ISR.
///
/// ```ignore
/// static RADIO: SharedNrfc<CriticalSectionRawMutex, MySpi, MyPin, MyDelay> =
///     SharedNrfc::new(Nrfc::new(ce_pin, spi, delay));
///
/// // in the IRQ pin's falling edge handler
/// RADIO.on_interrupt(&mut ());
///
/// // in the application
/// RADIO.lock(|radio| radio.configure(b"RCVR", 1, DataRate::Kbps250))?;
/// let acked = RADIO.send_to_timeout(b"RCVR", b"hello", 1000, &mut delay)?;
/// ```
pub struct SharedNrfc<M: RawMutex, SPI, DO, DELAY> {
    radio: Mutex<M, RefCell<Nrfc<SPI, DO, DELAY>>>,
    outcome: Signal<M, TxOutcome>,
}

impl<M, SPI, DO, DELAY> SharedNrfc<M, SPI, DO, DELAY>
where
    M: RawMutex,
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub const fn new(radio: Nrfc<SPI, DO, DELAY>) -> Self {
        Self {
            radio: Mutex::new(RefCell::new(radio)),
            outcome: Signal::new(),
        }
    }

    /// Run `f` with exclusive access to the radio.
    ///
    /// Do not call other [`SharedNrfc`] methods from within `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Nrfc<SPI, DO, DELAY>) -> R) -> R {
        self.radio.lock(|radio| f(&mut *radio.borrow_mut()))
    }

    /// Service the radio's IRQ and wake up a pending [`SharedNrfc::send_to_timeout()`].
    ///
    /// The radio is unlocked before `events` are notified, so observers may
    /// call back into this [`SharedNrfc`] (eg. to reply to a received payload).
    /// See [`EsbRadio::handle_interrupt()`].
    pub fn on_interrupt<E: RadioEvents>(&self, events: &mut E) -> Option<TxOutcome> {
        let report = self.lock(|radio| radio.service_interrupt());
        let outcome = report.dispatch(events);
        if let Some(outcome) = outcome {
            self.outcome.signal(outcome);
        }
        outcome
    }

    /// A fire-and-forget transmission. See [`EsbRadio::send_to()`].
    pub fn send_to(
        &self,
        address: &[u8],
        payload: &[u8],
        ask_ack: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.lock(|radio| radio.send_to(address, payload, ask_ack))
    }

    /// Transmit a `payload` to the given `address` and wait for it to be acknowledged.
    ///
    /// Failed attempts (and attempts that see no interrupt within 200 milliseconds)
    /// are retried until more than `timeout_ms` milliseconds have elapsed.
    /// The `delay` is used to wait in 1 millisecond steps while the radio is unlocked,
    /// so [`SharedNrfc::on_interrupt()`] must be called from elsewhere
    /// (an ISR or another thread).
    ///
    /// Returns `Ok(true)` if the payload was acknowledged, `Ok(false)` if the
    /// `timeout_ms` expired first.
    pub fn send_to_timeout(
        &self,
        address: &[u8],
        payload: &[u8],
        timeout_ms: u32,
        delay: &mut impl DelayNs,
    ) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        let mut elapsed = 0u32;
        loop {
            self.outcome.reset();
            self.send_to(address, payload, true)?;

            let mut waited = 0;
            let outcome = loop {
                delay.delay_ms(1);
                waited += 1;
                if let Some(outcome) = self.outcome.try_take() {
                    break Some(outcome);
                }
                if waited >= ATTEMPT_WINDOW_MS {
                    break None;
                }
            };
            match outcome {
                Some(TxOutcome::Sent) => return Ok(true),
                Some(TxOutcome::Failed) => {
                    debug!("transmission failed after {} ms; retrying", waited)
                }
                None => debug!("no transmission outcome within {} ms", waited),
            }

            elapsed = elapsed.saturating_add(waited);
            if elapsed > timeout_ms {
                let status = self.lock(|radio| radio.get_status_flags());
                warn!("transmission timed out ({})", status);
                return Ok(false);
            }
        }
    }

    pub fn into_inner(self) -> Nrfc<SPI, DO, DELAY> {
        self.radio.into_inner().into_inner()
    }
}
