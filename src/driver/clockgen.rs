//! Main waveform generator driver.
//!
//! [`ClockGen`] owns the sample buffer, the SLC descriptor ring and the
//! pattern table, and drives the I2S transmitter through a circular DMA
//! chain. The generic parameter fixes the buffer capacity in 32-bit words,
//! so all memory is statically allocated.
//!
//! # Usage
//!
//! ```ignore
//! static mut CLOCKGEN: ClockGenDefault = ClockGen::new();
//!
//! let drv = unsafe { &mut CLOCKGEN };
//! drv.init(
//!     ClockGenConfig::new()
//!         .with_total_words(1024)
//!         .with_target_hz(1_000_000),
//! )?;
//! drv.set_pattern_record(0, PatternRecord::new(8, 8, 0));
//! drv.begin()?;
//! ```
//!
//! The driver must not move while a session is running: the descriptor ring
//! holds raw addresses into the sample buffer. Static allocation (as above,
//! or through the `critical-section` wrapper) satisfies this.

use crate::clock::{self, ClockSetting, DividerPair};
use crate::driver::config::ClockGenConfig;
use crate::driver::interrupt::InterruptStatus;
use crate::driver::state::{Action, Event, State, transition};
use crate::encoder::{BitEncoder, MarkSpaceEncoder};
use crate::error::{ConfigResult, Result};
use crate::hal;
use crate::internal::constants::{
    DEBUG_SLOTS, DEFAULT_MARK_BITS, DEFAULT_SPACE_BITS, MAX_DESCRIPTORS,
};
use crate::internal::dma::{BufferLayout, DescriptorRing};
use crate::internal::register::i2s::I2sRegs;
use crate::internal::register::slc::SlcRegs;
use crate::pattern::{PatternRecord, PatternTable};

/// I2S circular-DMA waveform generator.
///
/// `CAPACITY` is the sample buffer size in 32-bit words; sessions may use any
/// length from 32 up to `min(CAPACITY, 4096)` words.
pub struct ClockGen<const CAPACITY: usize> {
    /// Sample buffer the descriptor ring cycles over
    buffer: [u32; CAPACITY],
    /// SLC descriptor ring
    ring: DescriptorRing<MAX_DESCRIPTORS>,
    /// Active partition of the buffer
    layout: BufferLayout,
    /// Mark/space pattern for the default encoder
    pattern: PatternTable,
    /// Buffer fill strategy
    encoder: &'static (dyn BitEncoder + Sync),
    /// Stop after a single ring pass
    one_shot: bool,
    /// Lifecycle state
    state: State,
    /// Diagnostic scratch slots (slot 0: last raw SLC status, slot 1:
    /// descriptor error count)
    debug: [u32; DEBUG_SLOTS],
    /// Whether `init` has succeeded since construction
    configured: bool,
}

impl<const CAPACITY: usize> ClockGen<CAPACITY> {
    /// Create an unconfigured driver. All memory is allocated inline, so
    /// this is usable in a `static` initializer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; CAPACITY],
            ring: DescriptorRing::new(),
            layout: BufferLayout::EMPTY,
            pattern: PatternTable::new(),
            encoder: &MarkSpaceEncoder,
            one_shot: false,
            state: State::Idle,
            debug: [0; DEBUG_SLOTS],
            configured: false,
        }
    }

    /// Buffer capacity in 32-bit words.
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Configure a session: buffer length, clock and one-shot mode.
    ///
    /// Validation happens before anything is touched; on error the previous
    /// configuration (and any running session) is left intact. On success any
    /// running session is stopped and the bit clock is programmed.
    pub fn init(&mut self, config: ClockGenConfig) -> ConfigResult<()> {
        config.validate(CAPACITY)?;

        self.stop_session();
        self.layout = BufferLayout::for_total(config.total_words);
        self.one_shot = config.one_shot;
        self.set_bit_clock(config.clock);
        self.configured = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "clockgen: init {} words ({} x {} + {}), one_shot={}",
            config.total_words,
            self.layout.buf_cnt,
            self.layout.buf_len,
            self.layout.remainder,
            config.one_shot
        );

        Ok(())
    }

    /// Program the bit clock, resolving a target frequency if asked to.
    ///
    /// Returns the divider pair actually written. The transmitter is held in
    /// reset during the update, so this is safe mid-session (the output
    /// glitches but the session keeps running).
    pub fn set_bit_clock(&mut self, setting: ClockSetting) -> DividerPair {
        let pair = clock::resolve(setting);
        clock::apply(pair);
        pair
    }

    /// Bit clock currently programmed, read back from the divider fields.
    ///
    /// This is the authoritative rate; it reflects register truncation rather
    /// than the requested value.
    #[must_use]
    pub fn real_bit_clock(&self) -> f32 {
        clock::read_back()
    }

    /// Write one pattern record (see [`PatternTable::set`] for the
    /// out-of-range behavior).
    pub fn set_pattern_record(&mut self, index: usize, record: PatternRecord) {
        self.pattern.set(index, record);
    }

    /// Discard the configured pattern.
    pub fn clear_pattern(&mut self) {
        self.pattern.clear();
    }

    /// Replace the buffer fill strategy.
    pub fn set_encoder(&mut self, encoder: &'static (dyn BitEncoder + Sync)) {
        self.encoder = encoder;
    }

    /// Zero the entire sample buffer.
    pub fn clear_buffers(&mut self) {
        self.buffer.fill(0);
    }

    /// Write a raw sample word directly into the buffer.
    ///
    /// Useful together with [`set_encoder`](Self::set_encoder) for waveforms
    /// the mark/space encoder cannot express.
    ///
    /// # Panics
    /// Panics if `index >= CAPACITY`.
    pub fn write_sample(&mut self, index: usize, sample: u32) {
        self.buffer[index] = sample;
    }

    /// Read a raw sample word from the buffer.
    ///
    /// # Panics
    /// Panics if `index >= CAPACITY`.
    #[must_use]
    pub fn sample(&self, index: usize) -> u32 {
        self.buffer[index]
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start transmitting.
    ///
    /// Any running session is stopped first. The descriptor ring is rebuilt,
    /// the buffer is (re-)encoded from the pattern table - installing a
    /// 16/16 square wave if no pattern was configured - and the SLC and I2S
    /// blocks are brought up. In one-shot mode the CPU interrupt is unmasked
    /// so the end-of-frame handler can stop the session.
    pub fn begin(&mut self) -> Result<()> {
        if !self.configured {
            return Err(crate::error::ConfigError::NotConfigured.into());
        }
        self.stop_session();

        self.ring.link(&self.buffer, &self.layout);

        // Arm the SLC engine. The RX link is what feeds the I2S transmit
        // FIFO; the TX link just needs any valid descriptor address.
        hal::interrupt::disable();
        SlcRegs::reset_links();
        SlcRegs::clear_all_interrupts();
        SlcRegs::set_dma_mode();
        SlcRegs::configure_rx_descriptors();
        SlcRegs::set_tx_link_addr(self.ring.spare_addr_u32());
        SlcRegs::set_rx_link_addr(self.ring.first_addr_u32());
        SlcRegs::enable_rx_eof_interrupt();
        if self.one_shot {
            hal::interrupt::enable();
        }
        SlcRegs::start_tx_link();
        SlcRegs::start_rx_link();

        if self.pattern.is_empty() {
            self.pattern.set(
                0,
                PatternRecord::new(DEFAULT_MARK_BITS, DEFAULT_SPACE_BITS, 0),
            );
        }
        let total = self.layout.total_words();
        let encoder = self.encoder;
        if let Err(e) = encoder.fill(&self.pattern, &mut self.buffer[..total]) {
            self.disarm_slc();
            return Err(e.into());
        }

        // Bring up the I2S transmitter over the freshly armed DMA chain
        hal::pinmux::claim();
        hal::clock::enable_i2s_clock();
        I2sRegs::clear_all_interrupts();
        I2sRegs::disable_all_interrupts();
        I2sRegs::reset_module();
        I2sRegs::enable_dma_mode();
        I2sRegs::reset_channel_mode();
        I2sRegs::start_tx();

        let (next, _) = transition(
            self.state,
            Event::Start {
                one_shot: self.one_shot,
            },
        );
        self.state = next;

        #[cfg(feature = "defmt")]
        defmt::info!("clockgen: begin, one_shot={}", self.one_shot);

        Ok(())
    }

    /// Stop transmitting and release the pins.
    ///
    /// Idempotent; safe to call whether or not a session is running. The
    /// configuration and pattern survive, so `begin` may be called again.
    pub fn end(&mut self) {
        self.stop_session();

        #[cfg(feature = "defmt")]
        defmt::info!("clockgen: end");
    }

    /// Current lifecycle state.
    #[inline(always)]
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether a session is currently running.
    #[inline(always)]
    #[must_use]
    pub fn is_transmitting(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Read a diagnostic scratch slot.
    ///
    /// Slot 0 holds the last raw SLC interrupt status seen by
    /// [`handle_interrupt`](Self::handle_interrupt); slot 1 counts descriptor
    /// errors.
    ///
    /// # Panics
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn debug_val(&self, index: usize) -> u32 {
        self.debug[index]
    }

    // =========================================================================
    // Interrupt path
    // =========================================================================

    /// Service the SLC interrupt.
    ///
    /// Call from the SLC interrupt handler (see the `clockgen_isr!` macro
    /// when the `critical-section` feature is enabled). Reads and clears the
    /// status, then feeds it through the state machine; in one-shot mode the
    /// end-of-frame event tears the session down.
    pub fn handle_interrupt(&mut self) {
        let raw = SlcRegs::int_status();
        SlcRegs::clear_all_interrupts();
        self.debug[0] = raw;
        self.process_interrupt(InterruptStatus::from_raw(raw));
    }

    /// State-machine half of interrupt handling, separated from the register
    /// reads so it can be driven directly.
    pub fn process_interrupt(&mut self, status: InterruptStatus) {
        if status.has_error() {
            self.debug[1] = self.debug[1].wrapping_add(1);
        }
        if status.rx_eof {
            let (next, action) = transition(self.state, Event::EndOfFrame);
            self.state = next;
            if matches!(action, Action::DisarmAndStop) {
                self.stop_session();

                #[cfg(feature = "defmt")]
                defmt::info!("clockgen: one-shot complete");
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Full teardown: transmitter off, pins released, SLC disarmed.
    fn stop_session(&mut self) {
        I2sRegs::stop_tx();
        I2sRegs::reset_module();
        hal::pinmux::release();
        self.disarm_slc();
        self.state = State::Idle;
    }

    /// Quiesce the SLC engine and unhook the descriptor ring.
    fn disarm_slc(&mut self) {
        hal::interrupt::disable();
        SlcRegs::clear_all_interrupts();
        SlcRegs::disable_all_interrupts();
        SlcRegs::clear_rx_link_addr();
        SlcRegs::clear_tx_link_addr();
        self.ring.detach();
    }

    /// Test access to the descriptor ring.
    #[cfg(test)]
    pub(crate) fn ring(&self) -> &DescriptorRing<MAX_DESCRIPTORS> {
        &self.ring
    }

    /// Test access to the active layout.
    #[cfg(test)]
    pub(crate) fn layout(&self) -> BufferLayout {
        self.layout
    }
}

impl<const CAPACITY: usize> Default for ClockGen<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// Quarter-capacity driver (1 KB of sample memory).
pub type ClockGenSmall = ClockGen<256>;
/// Mid-size driver (4 KB of sample memory).
pub type ClockGenDefault = ClockGen<1024>;
/// Full-capacity driver (16 KB of sample memory, the hardware maximum).
pub type ClockGenLarge = ClockGen<4096>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::internal::register::slc;
    use crate::testing::{SimulatedSlc, fake_regs, isr_gate};

    fn configured<const N: usize>(total: usize, one_shot: bool) -> ClockGen<N> {
        fake_regs::reset();
        isr_gate::reset();
        let mut drv: ClockGen<N> = ClockGen::new();
        drv.init(
            ClockGenConfig::new()
                .with_total_words(total)
                .with_dividers(4, 2)
                .with_one_shot(one_shot),
        )
        .unwrap();
        drv
    }

    #[test]
    fn init_rejects_invalid_sizes_without_configuring() {
        fake_regs::reset();
        let mut drv: ClockGen<4096> = ClockGen::new();

        assert_eq!(
            drv.init(ClockGenConfig::new().with_total_words(31)),
            Err(ConfigError::InvalidBufferSize)
        );
        assert_eq!(
            drv.init(ClockGenConfig::new().with_total_words(4097)),
            Err(ConfigError::InvalidBufferSize)
        );

        // A failed init must leave the driver unusable, not half-configured
        assert_eq!(
            drv.begin(),
            Err(Error::Config(ConfigError::NotConfigured))
        );
    }

    #[test]
    fn failed_init_leaves_running_session_alone() {
        let mut drv: ClockGen<256> = configured(256, false);
        drv.begin().unwrap();

        assert_eq!(
            drv.init(ClockGenConfig::new().with_total_words(8192)),
            Err(ConfigError::InvalidBufferSize)
        );

        // Validation failed before any teardown: still transmitting
        assert_eq!(drv.state(), State::Transmitting);
        assert_eq!(drv.ring().linked_count(), drv.layout().buf_cnt);
    }

    #[test]
    fn init_rejects_sizes_over_capacity() {
        fake_regs::reset();
        let mut drv: ClockGen<256> = ClockGen::new();
        assert_eq!(
            drv.init(ClockGenConfig::new().with_total_words(512)),
            Err(ConfigError::ExceedsCapacity)
        );
    }

    #[test]
    fn begin_installs_default_pattern() {
        let mut drv: ClockGen<256> = configured(256, false);
        drv.begin().unwrap();

        // No pattern configured: a 16/16 square wave fills the buffer
        for ix in 0..256 {
            assert_eq!(drv.sample(ix), 0xFFFF_0000, "word {ix}");
        }
        assert_eq!(drv.state(), State::Transmitting);
    }

    #[test]
    fn begin_encodes_configured_pattern() {
        let mut drv: ClockGen<256> = configured(256, false);
        drv.set_pattern_record(0, PatternRecord::new(8, 8, 0));
        drv.begin().unwrap();

        for ix in 0..256 {
            assert_eq!(drv.sample(ix), 0xFF00_FF00, "word {ix}");
        }
    }

    #[test]
    fn begin_links_ring_and_programs_slc() {
        let mut drv: ClockGen<256> = configured(256, false);
        drv.begin().unwrap();

        let layout = drv.layout();
        assert_eq!(drv.ring().linked_count(), layout.buf_cnt);
        assert_eq!(drv.ring().eof_count(), 1);

        let rx = SlcRegs::rx_link();
        assert_eq!(
            rx & slc::LINK_ADDR_MASK,
            drv.ring().first_addr_u32() & slc::LINK_ADDR_MASK
        );
        assert_ne!(rx & slc::LINK_START, 0);
        assert_eq!(SlcRegs::int_ena(), slc::INT_RX_EOF);
    }

    #[test]
    fn begin_twice_does_not_leak_descriptors() {
        let mut drv: ClockGen<512> = configured(512, false);
        drv.begin().unwrap();
        drv.begin().unwrap();

        assert_eq!(drv.ring().linked_count(), drv.layout().buf_cnt);
        assert_eq!(drv.ring().eof_count(), 1);
        assert_eq!(drv.state(), State::Transmitting);
    }

    #[test]
    fn end_is_idempotent() {
        let mut drv: ClockGen<256> = configured(256, false);

        // End before begin is a no-op
        drv.end();
        assert_eq!(drv.state(), State::Idle);

        drv.begin().unwrap();
        drv.end();
        drv.end();

        assert_eq!(drv.state(), State::Idle);
        assert_eq!(drv.ring().linked_count(), 0);
        assert_eq!(SlcRegs::int_ena(), 0);
        assert_eq!(SlcRegs::rx_link() & slc::LINK_ADDR_MASK, 0);
    }

    #[test]
    fn restart_after_end_works() {
        let mut drv: ClockGen<256> = configured(256, false);
        drv.begin().unwrap();
        drv.end();
        drv.begin().unwrap();
        assert_eq!(drv.state(), State::Transmitting);
    }

    #[test]
    fn one_shot_stops_exactly_at_end_of_frame() {
        let mut drv: ClockGen<64> = configured(64, true);
        drv.begin().unwrap();
        assert_eq!(drv.state(), State::OneShot);

        let buf_cnt = drv.layout().buf_cnt;
        let mut slc_sim = SimulatedSlc::attach(drv.ring());

        // Every descriptor before the EOF one completes without stopping
        for step in 0..buf_cnt - 1 {
            assert!(slc_sim.step(&mut drv), "step {step}");
            assert_eq!(drv.state(), State::OneShot, "stopped early at {step}");
        }

        // The EOF descriptor fires the interrupt and the session ends
        assert!(slc_sim.step(&mut drv));
        assert_eq!(drv.state(), State::Idle);
        assert_eq!(SlcRegs::int_ena(), 0);
        assert!(!isr_gate::is_enabled());
        assert_eq!(drv.ring().linked_count(), 0);
    }

    #[test]
    fn continuous_mode_ignores_end_of_frame() {
        let mut drv: ClockGen<64> = configured(64, false);
        drv.begin().unwrap();

        let buf_cnt = drv.layout().buf_cnt;
        let mut slc_sim = SimulatedSlc::attach(drv.ring());

        // The CPU interrupt stays masked, so EOF passes never stop anything
        for _ in 0..buf_cnt * 3 {
            slc_sim.step(&mut drv);
        }
        assert_eq!(drv.state(), State::Transmitting);
    }

    #[test]
    fn interrupt_status_lands_in_debug_slots() {
        let mut drv: ClockGen<64> = configured(64, true);
        drv.begin().unwrap();

        fake_regs::write_int_status(slc::INT_RX_EOF | slc::INT_RX_DSCR_ERR);
        drv.handle_interrupt();

        assert_eq!(drv.debug_val(0), slc::INT_RX_EOF | slc::INT_RX_DSCR_ERR);
        assert_eq!(drv.debug_val(1), 1);
        assert_eq!(drv.state(), State::Idle);
    }

    #[test]
    fn write_sample_round_trips() {
        let mut drv: ClockGen<64> = configured(64, false);
        drv.clear_buffers();
        drv.write_sample(7, 0xCAFE_F00D);
        assert_eq!(drv.sample(7), 0xCAFE_F00D);
        assert_eq!(drv.sample(6), 0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn write_sample_out_of_bounds_panics() {
        let mut drv: ClockGen<64> = ClockGen::new();
        drv.write_sample(64, 0);
    }

    #[test]
    fn custom_encoder_is_used() {
        struct Ramp;
        impl BitEncoder for Ramp {
            fn fill(
                &self,
                _pattern: &PatternTable,
                out: &mut [u32],
            ) -> core::result::Result<(), crate::encoder::EncodeError> {
                for (ix, word) in out.iter_mut().enumerate() {
                    *word = ix as u32;
                }
                Ok(())
            }
        }
        static RAMP: Ramp = Ramp;

        let mut drv: ClockGen<64> = configured(64, false);
        drv.set_encoder(&RAMP);
        drv.begin().unwrap();

        for ix in 0..64 {
            assert_eq!(drv.sample(ix), ix as u32);
        }
    }

    #[test]
    fn failing_encoder_disarms_slc() {
        struct Failing;
        impl BitEncoder for Failing {
            fn fill(
                &self,
                _pattern: &PatternTable,
                _out: &mut [u32],
            ) -> core::result::Result<(), crate::encoder::EncodeError> {
                Err(crate::encoder::EncodeError::EmptyPattern)
            }
        }
        static FAILING: Failing = Failing;

        let mut drv: ClockGen<64> = configured(64, false);
        drv.set_encoder(&FAILING);

        assert_eq!(
            drv.begin(),
            Err(Error::Encode(crate::encoder::EncodeError::EmptyPattern))
        );
        assert_eq!(drv.ring().linked_count(), 0);
        assert_eq!(SlcRegs::rx_link() & slc::LINK_ADDR_MASK, 0);
    }
}
