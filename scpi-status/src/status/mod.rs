//! Hierarchical status registers and the status byte.
//!
//! Status is reported through a tree of register groups. Each group holds a
//! condition register mirroring the device state, transition filters turning
//! condition edges into latched events, and an enable mask selecting which
//! events summarize into one bit of the parent group's condition register.
//! Summaries cascade until they reach the status byte, where the service
//! request enable mask decides bit 6 (MSS) and a service request towards the
//! host transport.
//!
//! The standard event status register (ESR), OPERation and QUEStionable
//! groups are always present; additional groups are declared when the
//! [`Context`] is created and may report into any bit of any tree register
//! or of the status byte.

use crate::error::ErrorQueue;
use crate::ieee488::StatusBit;
use crate::{Context, Control, Interface};

pub(crate) const BUILTIN_COUNT: usize = 3;

/// Read result for registers that have no sub-registers (STB and SRE).
const NO_SUBREGISTER: u16 = 0x8000;

/// Identifies one register in the status-reporting structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterId {
    /// Standard Event Status Register.
    ///
    /// Event-only: condition and transition-filter writes are rejected.
    Esr,
    /// OPERation status register group.
    Operation,
    /// QUEStionable status register group.
    Questionable,
    /// User-declared register group, in declaration order.
    User(u16),
    /// Status Byte register (flat, 8 bit).
    Stb,
    /// Service Request Enable register (flat, 8 bit).
    Sre,
}

/// The five sub-registers of a register group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubRegister {
    /// Current device state.
    Condition,
    /// Latched transition events, cleared on read.
    Event,
    /// Event-to-summary mask.
    Enable,
    /// Positive transition filter.
    PTransition,
    /// Negative transition filter.
    NTransition,
}

/// The sub-registers of one register group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRegister {
    pub condition: u16,
    pub event: u16,
    pub enable: u16,
    pub ptr_filter: u16,
    pub ntr_filter: u16,
}

impl EventRegister {
    pub(crate) fn get(&self, subreg: SubRegister) -> u16 {
        match subreg {
            SubRegister::Condition => self.condition,
            SubRegister::Event => self.event,
            SubRegister::Enable => self.enable,
            SubRegister::PTransition => self.ptr_filter,
            SubRegister::NTransition => self.ntr_filter,
        }
    }

    fn assign(&mut self, subreg: SubRegister, value: u16) {
        match subreg {
            SubRegister::Condition => self.condition = value,
            SubRegister::Event => self.event = value,
            SubRegister::Enable => self.enable = value,
            SubRegister::PTransition => self.ptr_filter = value,
            SubRegister::NTransition => self.ntr_filter = value,
        }
    }

    /// Event register value after applying `condition` through the
    /// transition filters. Latched events stay set.
    fn next_event(&self, condition: u16) -> u16 {
        let transitions = self.condition ^ condition;
        self.event | (transitions & ((condition & self.ptr_filter) | (!condition & self.ntr_filter)))
    }

    /// True when any enabled event bit is set.
    fn summary(&self) -> bool {
        self.event & self.enable != 0
    }
}

/// Initial values for the writable masks of a register group.
///
/// Applied when the context is created and by [`Context::preset`]; `*CLS`
/// does not touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPreset {
    pub ptr_filter: u16,
    pub ntr_filter: u16,
    pub enable: u16,
}

impl Default for RegisterPreset {
    /// All positive transitions pass, nothing enabled.
    fn default() -> Self {
        RegisterPreset {
            ptr_filter: 0xffff,
            ntr_filter: 0,
            enable: 0,
        }
    }
}

/// Which bit of which parent register summarizes a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBit {
    pub reg: RegisterId,
    pub bit: u8,
}

/// Declaration of a register group: its presets and its place in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    pub preset: RegisterPreset,
    pub parent: SummaryBit,
}

impl GroupConfig {
    /// A group reporting into `bit` of `parent`, with default presets.
    pub const fn child_of(parent: RegisterId, bit: u8) -> Self {
        GroupConfig {
            preset: RegisterPreset {
                ptr_filter: 0xffff,
                ntr_filter: 0,
                enable: 0,
            },
            parent: SummaryBit { reg: parent, bit },
        }
    }
}

/// One node of the status tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RegisterGroup {
    pub(crate) register: EventRegister,
    pub(crate) preset: RegisterPreset,
    pub(crate) parent: SummaryBit,
}

impl RegisterGroup {
    pub(crate) fn with_config(config: GroupConfig) -> Self {
        RegisterGroup {
            register: EventRegister {
                condition: 0,
                event: 0,
                enable: config.preset.enable,
                ptr_filter: config.preset.ptr_filter,
                ntr_filter: config.preset.ntr_filter,
            },
            preset: config.preset,
            parent: config.parent,
        }
    }
}

// GROUP, PTR_PRESET, PARENT_BIT (NTR and ENAB preset to 0, parent is the STB)
pub(crate) const BUILTIN_GROUPS: [GroupConfig; BUILTIN_COUNT] = [
    builtin(0x0000, StatusBit::Esb),          // ESR
    builtin(0x7fff, StatusBit::Operation),    // OPERation
    builtin(0x7fff, StatusBit::Questionable), // QUEStionable
];

const fn builtin(ptr_filter: u16, bit: StatusBit) -> GroupConfig {
    GroupConfig {
        preset: RegisterPreset {
            ptr_filter,
            ntr_filter: 0,
            enable: 0,
        },
        parent: SummaryBit {
            reg: RegisterId::Stb,
            bit: bit as u8,
        },
    }
}

/// Rejected register-tree declaration, reported when a context is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The group's parent is not a tree register or the status byte.
    ///
    /// SRE holds no summaries and the event-only ESR cannot accept
    /// condition writes from a child.
    InvalidParent(u16),
    /// The declared summary bit lies outside the parent register.
    InvalidSummaryBit(u16),
    /// Following the group's parents never reaches the status byte.
    UnrootedGroup(u16),
}

/// Every parent chain must terminate at the STB within the total group
/// count, otherwise the declarations contain a cycle.
pub(crate) fn validate_user_groups(user: &[GroupConfig]) -> Result<(), ConfigError> {
    for (idx, config) in user.iter().enumerate() {
        let idx = idx as u16;
        let mut parent = config.parent;
        let mut steps = user.len() + BUILTIN_COUNT;
        loop {
            match parent.reg {
                RegisterId::Stb => {
                    if parent.bit > 7 {
                        return Err(ConfigError::InvalidSummaryBit(idx));
                    }
                    break;
                }
                RegisterId::Sre | RegisterId::Esr => return Err(ConfigError::InvalidParent(idx)),
                RegisterId::Operation | RegisterId::Questionable => {
                    if parent.bit > 15 {
                        return Err(ConfigError::InvalidSummaryBit(idx));
                    }
                    // Built-in groups report straight into the STB
                    break;
                }
                RegisterId::User(next) => {
                    if parent.bit > 15 {
                        return Err(ConfigError::InvalidSummaryBit(idx));
                    }
                    let Some(next) = user.get(next as usize) else {
                        return Err(ConfigError::InvalidParent(idx));
                    };
                    if steps == 0 {
                        return Err(ConfigError::UnrootedGroup(idx));
                    }
                    steps -= 1;
                    parent = next.parent;
                }
            }
        }
    }
    Ok(())
}

impl<'a, I, Q, const USER: usize> Context<'a, I, Q, USER>
where
    I: Interface,
    Q: ErrorQueue,
{
    pub(crate) fn group(&self, reg: RegisterId) -> Option<&RegisterGroup> {
        match reg {
            RegisterId::Esr => Some(&self.builtin[0]),
            RegisterId::Operation => Some(&self.builtin[1]),
            RegisterId::Questionable => Some(&self.builtin[2]),
            RegisterId::User(idx) => self.user.get(idx as usize),
            RegisterId::Stb | RegisterId::Sre => None,
        }
    }

    pub(crate) fn group_mut(&mut self, reg: RegisterId) -> Option<&mut RegisterGroup> {
        match reg {
            RegisterId::Esr => Some(&mut self.builtin[0]),
            RegisterId::Operation => Some(&mut self.builtin[1]),
            RegisterId::Questionable => Some(&mut self.builtin[2]),
            RegisterId::User(idx) => self.user.get_mut(idx as usize),
            RegisterId::Stb | RegisterId::Sre => None,
        }
    }

    /// All tree groups, built-in first then user groups in declaration order.
    pub(crate) fn group_ids() -> impl Iterator<Item = RegisterId> {
        [
            RegisterId::Esr,
            RegisterId::Operation,
            RegisterId::Questionable,
        ]
        .into_iter()
        .chain((0..USER as u16).map(RegisterId::User))
    }

    /// Get a register value.
    ///
    /// Reading an event register clears it, which cascades towards the
    /// status byte like any other event change. STB and SRE have no
    /// sub-registers and read as `0x8000`, as does an unknown user group.
    pub fn reg_get(&mut self, reg: RegisterId, subreg: SubRegister) -> u16 {
        let Some(group) = self.group(reg) else {
            return NO_SUBREGISTER;
        };
        let value = group.register.get(subreg);
        if subreg == SubRegister::Event {
            self.reg_set(reg, SubRegister::Event, 0);
        }
        value
    }

    /// Side-effect-free register read, for inspecting event registers
    /// without consuming them.
    #[allow(dead_code)]
    pub(crate) fn reg_peek(&self, reg: RegisterId, subreg: SubRegister) -> u16 {
        self.group(reg)
            .map(|group| group.register.get(subreg))
            .unwrap_or(NO_SUBREGISTER)
    }

    /// Set a register value.
    ///
    /// Condition and event writes run the summary propagation towards the
    /// status byte; enable and transition-filter writes only assign. For the
    /// event-only ESR, condition and filter writes are rejected. Writing SRE
    /// recomputes MSS; STB is a computed summary and cannot be written here.
    pub fn reg_set(&mut self, reg: RegisterId, subreg: SubRegister, value: u16) {
        match reg {
            RegisterId::Stb => {}
            RegisterId::Sre => self.set_sre(value as u8),
            _ => {
                let Some(group) = self.group(reg) else { return };
                // Unchanged values propagate nothing
                if group.register.get(subreg) == value {
                    return;
                }
                if reg == RegisterId::Esr
                    && !matches!(subreg, SubRegister::Event | SubRegister::Enable)
                {
                    return;
                }
                if !matches!(subreg, SubRegister::Condition | SubRegister::Event) {
                    if let Some(group) = self.group_mut(reg) {
                        group.register.assign(subreg, value);
                    }
                    return;
                }
                self.propagate(reg, subreg, value);
            }
        }
    }

    /// Set bits of a register.
    ///
    /// For the STB only the two designer bits (0 and 1) are honored; all
    /// other STB bits have roles defined by the standard and are driven by
    /// the tree, the error queue or the response formatter. For the SRE the
    /// full mask applies. Tree registers OR the mask into the addressed
    /// sub-register and propagate through [`Context::reg_set`].
    pub fn reg_set_bits(&mut self, reg: RegisterId, subreg: SubRegister, bits: u16) {
        match reg {
            RegisterId::Stb => {
                self.stb |=
                    bits as u8 & (StatusBit::Designer0.mask() | StatusBit::Designer1.mask());
                self.update_mss();
            }
            RegisterId::Sre => {
                self.sre |= bits as u8;
                self.update_mss();
            }
            _ => {
                let Some(group) = self.group(reg) else { return };
                let value = group.register.get(subreg) | bits;
                self.reg_set(reg, subreg, value);
            }
        }
    }

    /// Clear bits of a register.
    ///
    /// Mirror of [`Context::reg_set_bits`], with the same STB designer-bit
    /// restriction.
    pub fn reg_clear_bits(&mut self, reg: RegisterId, subreg: SubRegister, bits: u16) {
        match reg {
            RegisterId::Stb => {
                self.stb &=
                    !(bits as u8 & (StatusBit::Designer0.mask() | StatusBit::Designer1.mask()));
                self.update_mss();
            }
            RegisterId::Sre => {
                self.sre &= !(bits as u8);
                self.update_mss();
            }
            _ => {
                let Some(group) = self.group(reg) else { return };
                let value = group.register.get(subreg) & !bits;
                self.reg_set(reg, subreg, value);
            }
        }
    }

    /// Drive the message-available bit (STB bit 4).
    ///
    /// MAV belongs to the host's output queue; the response formatter raises
    /// it when a response unit is queued and drops it once the output is
    /// read.
    pub fn set_mav(&mut self, mav: bool) {
        self.set_stb_bit(StatusBit::Mav as u8, mav);
    }

    /// Reapply every group's preset to its enable and transition filters.
    ///
    /// Condition and event registers are untouched; a `STATus:PRESet`
    /// implementation builds on this.
    pub fn preset(&mut self) {
        for id in Self::group_ids() {
            if let Some(group) = self.group_mut(id) {
                group.register.enable = group.preset.enable;
                group.register.ptr_filter = group.preset.ptr_filter;
                group.register.ntr_filter = group.preset.ntr_filter;
            }
        }
    }

    /// Walk a condition/event change upwards, one register group per
    /// iteration, until a level reports no observable change or the summary
    /// reaches the status byte.
    fn propagate(&mut self, start: RegisterId, subreg: SubRegister, value: u16) {
        let mut working = start;
        // An event write skips the condition logic on the first iteration
        let mut skip_condition = subreg == SubRegister::Event;
        let mut new_condition = value;
        let mut new_event = value;

        let (summary, stb_bit) = loop {
            let Some(group) = self.group_mut(working) else {
                return;
            };

            // Condition logic: filter the transitions into latched events
            if !skip_condition {
                new_event = group.register.next_event(new_condition);
                group.register.condition = new_condition;
            }

            // Event logic: an unchanged event register stops the propagation
            if group.register.event == new_event {
                return;
            }
            group.register.event = new_event;
            let summary = group.register.summary();
            let parent = group.parent;

            // Summary logic: the STB is updated outside the loop
            if parent.reg == RegisterId::Stb {
                break (summary, parent.bit);
            }
            let Some(parent_group) = self.group(parent.reg) else {
                return;
            };
            let parent_condition = parent_group.register.condition;
            if (parent_condition & (1 << parent.bit) != 0) == summary {
                return;
            }
            new_condition = if summary {
                parent_condition | (1 << parent.bit)
            } else {
                parent_condition & !(1 << parent.bit)
            };
            working = parent.reg;
            skip_condition = false;
        };

        self.set_stb_bit(stb_bit, summary);
    }

    /// Set or clear one STB bit without recomputing MSS.
    ///
    /// The caller runs [`Context::update_mss`] once every STB source it
    /// touches is up to date, so a service request never carries a
    /// partially-updated status byte.
    pub(crate) fn set_stb_bit_raw(&mut self, bit: u8, value: bool) {
        if value {
            self.stb |= 1 << bit;
        } else {
            self.stb &= !(1 << bit);
        }
    }

    /// Set or clear one STB bit and recompute MSS.
    pub(crate) fn set_stb_bit(&mut self, bit: u8, value: bool) {
        self.set_stb_bit_raw(bit, value);
        self.update_mss();
    }

    /// Recompute STB bit 6 from the STB/SRE pair.
    ///
    /// The service request fires on the rising edge of MSS only.
    pub(crate) fn update_mss(&mut self) {
        let mask = StatusBit::RqsMss.mask();
        if (self.stb & !mask) & (self.sre & !mask) != 0 {
            if self.stb & mask == 0 {
                self.stb |= mask;
                let stb = self.stb;
                self.interface.control(Control::ServiceRequest, stb);
            }
        } else {
            self.stb &= !mask;
        }
    }
}
