#![cfg_attr(not(feature = "std"), no_std)]

//! This crate implements the IEEE 488.2 status-reporting model used by
//! measurement instruments: hierarchical status register groups with
//! condition/event/enable sub-registers and transition filters, the status
//! byte (STB) and service request enable (SRE) registers, the error/event
//! queue, and the mandatory common commands (`*CLS`, `*ESE`, `*ESR?`,
//! `*IDN?`, `*OPC`, `*RST`, `*SRE`, `*STB?`, `*TST?`, `*WAI`) operating on
//! them.
//!
//! It does not require the std library (it is `no_std` compatible) or a
//! system allocator.
//!
//! # Scope
//! The crate does not tokenize commands, traverse a command tree or encode
//! responses, and it carries no transport. The host's parser dispatches
//! resolved common-command headers into the handler methods of [`Context`]
//! and supplies the [`parser::Parameters`] and [`parser::Formatter`]
//! collaborators; service requests reach the host transport through the
//! [`Interface`] trait.
//!
//! # Features
#![doc = document_features::document_features!()]
//!
//! # Getting started
//! ```
//! use scpi_status::prelude::*;
//!
//! let idn = Identification {
//!     manufacturer: Some(b"ACME"),
//!     model: Some(b"X1"),
//!     ..Default::default()
//! };
//! let mut context: Context<(), ArrayErrorQueue<8>> =
//!     Context::new((), ArrayErrorQueue::new(), idn, []).unwrap();
//!
//! // An enabled questionable event summarizes into bit 3 of the status byte
//! context.reg_set(RegisterId::Questionable, SubRegister::Enable, 0x0001);
//! context.reg_set(RegisterId::Questionable, SubRegister::Condition, 0x0001);
//! assert_eq!(context.stb(), 0x08);
//! ```
//!
//! # Character coding
//! SCPI is strictly ASCII; identification fields and error messages are
//! byte slices holding ASCII data.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std as alloc;

use core::fmt::Display;

pub mod error;
pub mod ieee488;
pub mod parser;
pub mod status;

use error::{ErrorQueue, Result};
use status::{ConfigError, GroupConfig, RegisterGroup};

/// Prelude containing the most useful stuff
///
pub mod prelude {
    pub use crate::error::{ArrayErrorQueue, Error, ErrorCode, ErrorQueue, Result};
    pub use crate::status::{
        ConfigError, GroupConfig, RegisterId, RegisterPreset, SubRegister, SummaryBit,
    };
    pub use crate::{Context, Control, Identification, Interface};
}

/// Control messages emitted towards the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Assert a service request; the payload is the current status byte.
    ServiceRequest,
}

/// Host capabilities consumed by the status core.
///
/// Both methods default to no-ops so a host without a control channel or
/// reset hook implements the trait with an empty block; `()` can serve as
/// the interface of a host with neither.
pub trait Interface {
    /// Deliver a control message, e.g. assert SRQ on the bus.
    ///
    /// Must not call back into the [`Context`] that emitted it.
    fn control(&mut self, _ctrl: Control, _value: u8) {}

    /// Device reset, invoked by `*RST`.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Interface for () {}

/// The four `*IDN?` response fields.
///
/// Fields the instrument does not provide respond with the character `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identification<'a> {
    /// Should be identical for all devices produced by a single company.
    pub manufacturer: Option<&'a [u8]>,
    /// Should NOT contain the word "MODEL".
    pub model: Option<&'a [u8]>,
    /// Serial number.
    pub serial: Option<&'a [u8]>,
    /// Firmware level, covering all separately revisable subsystems.
    pub firmware: Option<&'a [u8]>,
}

impl Display for Identification<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, field) in [self.manufacturer, self.model, self.serial, self.firmware]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(core::str::from_utf8(field.unwrap_or(b"0")).unwrap_or("0"))?;
        }
        Ok(())
    }
}

/// Root of the status-reporting structure.
///
/// Owns the built-in ESR, OPERation and QUEStionable register groups, the
/// `USER` additional groups declared at construction, the STB and SRE
/// registers, the error/event queue and the host interface. Every operation
/// takes the context, so two instruments in one process are two independent
/// contexts.
///
/// Operations run to completion on the caller's thread; `&mut self`
/// receivers make reentrant use impossible. The only external call is the
/// synchronous [`Interface::control`] callback.
pub struct Context<'a, I: Interface, Q: ErrorQueue, const USER: usize = 0> {
    builtin: [RegisterGroup; status::BUILTIN_COUNT],
    user: [RegisterGroup; USER],
    stb: u8,
    sre: u8,
    errors: Q,
    idn: Identification<'a>,
    interface: I,
}

impl<'a, I, Q, const USER: usize> Context<'a, I, Q, USER>
where
    I: Interface,
    Q: ErrorQueue,
{
    /// Create a context over `interface` with `USER` additional register
    /// groups.
    ///
    /// The group declarations are validated here rather than at run time:
    /// every parent chain must end at the status byte and may not pass
    /// through SRE or the event-only ESR.
    pub fn new(
        interface: I,
        errors: Q,
        idn: Identification<'a>,
        user: [GroupConfig; USER],
    ) -> core::result::Result<Self, ConfigError> {
        status::validate_user_groups(&user)?;
        Ok(Context {
            builtin: status::BUILTIN_GROUPS.map(RegisterGroup::with_config),
            user: user.map(RegisterGroup::with_config),
            stb: 0,
            sre: 0,
            errors,
            idn,
            interface,
        })
    }

    /// Current status byte, MSS included.
    pub fn stb(&self) -> u8 {
        self.stb
    }

    /// Current service request enable register.
    pub fn sre(&self) -> u8 {
        self.sre
    }

    /// Assign the service request enable register.
    ///
    /// MSS is recomputed; a rising MSS emits
    /// [`Control::ServiceRequest`](Control) through the interface.
    pub fn set_sre(&mut self, value: u8) {
        self.sre = value;
        self.update_mss();
    }

    /// The `*IDN?` fields of this instrument.
    pub fn idn(&self) -> &Identification<'a> {
        &self.idn
    }

    /// The host interface.
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// The host interface, mutably.
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }
}
