//! Handlers for the mandated IEEE 488.2 common commands.
//!
//! | Mnemonic | Name                                 | 488.2 Section |
//! |----------|--------------------------------------|---------------|
//! | *CLS     | Clear Status Command                 | 10.3          |
//! | *ESE     | Standard Event Status Enable Command | 10.10         |
//! | *ESE?    | Standard Event Status Enable Query   | 10.11         |
//! | *ESR?    | Standard Event Status Register Query | 10.12         |
//! | *IDN?    | Identification Query                 | 10.14         |
//! | *OPC     | Operation Complete Command           | 10.18         |
//! | *OPC?    | Operation Complete Query             | 10.19         |
//! | *RST     | Reset Command                        | 10.32         |
//! | *SRE     | Service Request Enable Command       | 10.34         |
//! | *SRE?    | Service Request Enable Query         | 10.35         |
//! | *STB?    | Read Status Byte Query               | 10.36         |
//! | *TST?    | Self-Test Query                      | 10.38         |
//! | *WAI     | Wait-To-Continue                     | 10.39         |
//!
//! The host's parser resolves a common-command header and dispatches to the
//! matching `exec_*`/`query_*` handler. Handlers report decode failures as
//! errors; the dispatch loop is expected to record them with
//! [`Context::push_error`].

use crate::error::{ErrorQueue, Result};
use crate::ieee488::EventStatusBit;
use crate::parser::{Formatter, Parameters};
use crate::status::{RegisterId, SubRegister};
use crate::{Context, Identification, Interface};

impl<'a, I, Q, const USER: usize> Context<'a, I, Q, USER>
where
    I: Interface,
    Q: ErrorQueue,
{
    ///## 10.3 *CLS, Clear Status Command
    ///> The Clear Status command clears status data structures, see 11.1.2,
    ///> and forces the device to the Operation Complete Command Idle State
    ///> and the Operation Complete Query Idle State.
    ///
    /// Empties the error/event queue, zeroes every event register and the
    /// status byte. Enable registers and transition filters survive, as do
    /// hardware-owned condition bits; only the summary bits derived from the
    /// cleared events are dropped from parent condition registers.
    pub fn exec_cls(&mut self) -> Result<()> {
        self.errors.clear_errors();
        for id in Self::group_ids() {
            if let Some(group) = self.group_mut(id) {
                group.register.event = 0;
            }
        }
        for id in Self::group_ids() {
            let Some(parent) = self.group(id).map(|group| group.parent) else {
                continue;
            };
            if parent.reg != RegisterId::Stb {
                if let Some(parent_group) = self.group_mut(parent.reg) {
                    parent_group.register.condition &= !(1 << parent.bit);
                }
            }
        }
        self.stb = 0;
        Ok(())
    }

    ///## 10.10 *ESE, Standard Event Status Enable Command
    ///> The Standard Event Status Enable command sets the Standard Event
    ///> Status Enable Register bits as defined in 11.5.1.3.
    pub fn exec_ese(&mut self, params: &mut dyn Parameters) -> Result<()> {
        let ese = params.next_i32()?;
        self.reg_set(RegisterId::Esr, SubRegister::Enable, ese as u16);
        Ok(())
    }

    ///## 10.11 *ESE?, Standard Event Status Enable Query
    ///> The Standard Event Status Enable query allows the programmer to
    ///> determine the current contents of the Standard Event Status Enable
    ///> Register.
    pub fn query_ese(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(self.reg_get(RegisterId::Esr, SubRegister::Enable) as i32)
    }

    ///## 10.12 *ESR?, Standard Event Status Register Query
    ///> The Standard Event Status Register query allows the programmer to
    ///> determine the current contents of the Standard Event Status
    ///> Register. Reading the Standard Event Status Register clears it.
    pub fn query_esr(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(self.reg_get(RegisterId::Esr, SubRegister::Event) as i32)
    }

    ///## 10.14 *IDN?, Identification Query
    ///> The intent of the Identification query is for the unique
    ///> identification of devices over the system interface.
    ///
    /// Four comma-separated fields; fields the instrument does not provide
    /// read as the character `0`.
    pub fn query_idn(&mut self, response: &mut dyn Formatter) -> Result<()> {
        let Identification {
            manufacturer,
            model,
            serial,
            firmware,
        } = self.idn;
        for field in [manufacturer, model, serial, firmware] {
            response.push_mnemonic(field.unwrap_or(b"0"))?;
        }
        Ok(())
    }

    ///## 10.18 *OPC, Operation Complete Command
    ///> The Operation Complete command causes the device to generate the
    ///> operation complete message in the Standard Event Status Register
    ///> when all pending selected device operations have been finished.
    pub fn exec_opc(&mut self) -> Result<()> {
        self.reg_set_bits(
            RegisterId::Esr,
            SubRegister::Event,
            EventStatusBit::OperationComplete.mask() as u16,
        );
        Ok(())
    }

    ///## 10.19 *OPC?, Operation Complete Query
    ///> The Operation Complete query places an ASCII character "1" into the
    ///> device's Output Queue when all pending selected device operations
    ///> have been finished.
    ///
    /// Commands here are sequential, so every operation has completed.
    pub fn query_opc(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(1)
    }

    ///## 10.32 *RST, Reset Command
    ///> The Reset command performs a device reset.
    ///
    /// Delegated to [`Interface::reset`]. Reset does not affect the status
    /// data structures, enable registers or the error/event queue.
    pub fn exec_rst(&mut self) -> Result<()> {
        self.interface.reset()
    }

    ///## 10.34 *SRE, Service Request Enable Command
    ///> The Service Request Enable command sets the Service Request Enable
    ///> Register bits as defined in 11.3.2.
    pub fn exec_sre(&mut self, params: &mut dyn Parameters) -> Result<()> {
        let sre = params.next_i32()?;
        self.set_sre(sre as u8);
        Ok(())
    }

    ///## 10.35 *SRE?, Service Request Enable Query
    ///> The Service Request Enable query allows the programmer to determine
    ///> the current contents of the Service Request Enable Register.
    pub fn query_sre(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(self.sre() as i32)
    }

    ///## 10.36 *STB?, Read Status Byte Query
    ///> The Read Status Byte query allows the programmer to read the status
    ///> byte and Master Summary Status bit.
    pub fn query_stb(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(self.stb() as i32)
    }

    ///## 10.38 *TST?, Self-Test Query
    ///> The self-test query causes an internal self-test and places a
    ///> response into the Output Queue indicating whether or not the device
    ///> completed the self-test without any detected errors.
    pub fn query_tst(&mut self, response: &mut dyn Formatter) -> Result<()> {
        response.push_i32(0)
    }

    ///## 10.39 *WAI, Wait-to-Continue Command
    ///> The Wait-to-Continue command shall prevent the device from executing
    ///> any further commands or queries until the no-operation-pending flag
    ///> is TRUE.
    ///
    /// Only sequential commands exist here, so the flag is always true.
    pub fn exec_wai(&mut self) -> Result<()> {
        Ok(())
    }
}
