//! Standard SCPI/IEEE 488.2 errors and the error/event queue.
//!
//! Each error variant of [`ErrorCode`] has the corresponding error/event
//! number as its code. The minimal table used by the library itself is
//! always compiled in; the remaining standard codes are selected with the
//! `error-codes-*` features.

use core::fmt::Display;

use arrayvec::ArrayString;
use scpi_status_derive::ScpiError;

use crate::ieee488::{EventStatusBit, StatusBit};
use crate::status::{RegisterId, SubRegister};
use crate::{Context, Interface};

mod arrayqueue;
pub use arrayqueue::ArrayErrorQueue;

#[cfg(feature = "alloc")]
mod vecdeque;
#[cfg(feature = "alloc")]
pub use vecdeque::DequeErrorQueue;

/// Useful alias of Result for SCPI operations
pub type Result<T> = core::result::Result<T, Error>;

/// Capacity of the device-dependent info string carried by an [`Error`].
///
/// Longer strings are truncated when the error is created.
pub const ERROR_INFO_CAPACITY: usize = 32;

/// Bounded copy of a device-dependent error info string.
pub type ErrorInfo = ArrayString<ERROR_INFO_CAPACITY>;

/// A SCPI error/event with an optional device-dependent info string.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Error(ErrorCode, Option<ErrorInfo>);

impl Error {
    /// Create a new error with the specified error code.
    pub fn new(code: ErrorCode) -> Self {
        Self(code, None)
    }

    /// Create a new error with a custom (unchecked) code.
    pub fn custom(code: i16, message: &'static [u8]) -> Self {
        Self(ErrorCode::Custom(code, message), None)
    }

    /// Create a new error carrying a device-dependent info string.
    ///
    /// The string is copied into the error; anything beyond
    /// [`ERROR_INFO_CAPACITY`] is silently dropped.
    pub fn extended(code: ErrorCode, info: &str) -> Self {
        let mut buf = ErrorInfo::new();
        for ch in info.chars() {
            if buf.try_push(ch).is_err() {
                break;
            }
        }
        Self(code, Some(buf))
    }

    /// Numeric error code.
    pub fn get_code(&self) -> i16 {
        self.0.get_code()
    }

    /// Standard message of the error.
    pub fn get_message(&self) -> &'static [u8] {
        self.0.get_message()
    }

    /// Device-dependent info string, if any.
    pub fn get_info(&self) -> Option<&str> {
        self.1.as_deref()
    }

    /// Bitmask of the event-status bit this error/event raises.
    pub fn esr_mask(&self) -> u8 {
        self.0.esr_mask()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let code = self.get_code();
        let msg = core::str::from_utf8(self.get_message()).unwrap_or("<invalid utf8>");

        if let Some(info) = self.get_info() {
            write!(f, "{code},\"{msg};{info}\"")
        } else {
            write!(f, "{code},\"{msg}\"")
        }
    }
}

impl Default for Error {
    fn default() -> Self {
        Self::new(ErrorCode::NoError)
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Error::new(code)
    }
}

impl PartialEq<ErrorCode> for Error {
    fn eq(&self, other: &ErrorCode) -> bool {
        &self.0 == other
    }
}

impl PartialEq<Error> for ErrorCode {
    fn eq(&self, other: &Error) -> bool {
        self == &other.0
    }
}

/// Standard SCPI error/event codes.
///
/// The system-defined error/event numbers are chosen on an enumerated basis;
/// the first code of each class (-100, -200, -300, -400) is a generic error
/// used when nothing more specific applies. A minimal parser reports only
/// the generic codes, a smarter one the specific ones; the optional classes
/// compile in via the `error-codes-*` features.
#[derive(Debug, PartialEq, Eq, Copy, Clone, ScpiError)]
pub enum ErrorCode {
    /// Device-specific error with a free-form code in `[-399, -300]` or
    /// `[1, 32767]` and a caller-provided message.
    #[error(custom)]
    Custom(i16, &'static [u8]),

    /// `0, "No error"`
    ///
    /// The queue is completely empty. Every error/event in the queue has
    /// been read or the queue was purposely cleared by power-on, `*CLS`, etc.
    #[error(code = 0, message = b"No error")]
    NoError,

    ///# Command Errors `[-199, -100]`
    /// `-100, "Command error"`
    ///
    /// An IEEE 488.2 syntax error was detected by the parser. Sets the
    /// command error bit (bit 5) of the event status register.
    #[cfg(feature = "error-codes-command")]
    #[error(code = -100, message = b"Command error")]
    CommandError,
    /// `-101, "Invalid character"`
    #[error(code = -101, message = b"Invalid character")]
    InvalidCharacter,
    /// `-102, "Syntax error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -102, message = b"Syntax error")]
    SyntaxError,
    /// `-103, "Invalid separator"`
    #[error(code = -103, message = b"Invalid separator")]
    InvalidSeparator,
    /// `-104, "Data type error"`
    #[error(code = -104, message = b"Data type error")]
    DataTypeError,
    /// `-105, "GET not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -105, message = b"GET not allowed")]
    GetNotAllowed,
    /// `-108, "Parameter not allowed"`
    #[error(code = -108, message = b"Parameter not allowed")]
    ParameterNotAllowed,
    /// `-109, "Missing parameter"`
    #[error(code = -109, message = b"Missing parameter")]
    MissingParameter,
    /// `-110, "Command header error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -110, message = b"Command header error")]
    CommandHeaderError,
    /// `-111, "Header separator error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -111, message = b"Header separator error")]
    HeaderSeparatorError,
    /// `-112, "Program mnemonic too long"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -112, message = b"Program mnemonic too long")]
    ProgramMnemonicTooLong,
    /// `-113, "Undefined header"`
    ///
    /// The header is syntactically correct but undefined for this device.
    #[error(code = -113, message = b"Undefined header")]
    UndefinedHeader,
    /// `-114, "Header suffix out of range"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -114, message = b"Header suffix out of range")]
    HeaderSuffixOutOfRange,
    /// `-115, "Unexpected number of parameters"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -115, message = b"Unexpected number of parameters")]
    UnexpectedNumberOfParameters,
    /// `-120, "Numeric data error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -120, message = b"Numeric data error")]
    NumericDataError,
    /// `-121, "Invalid character in number"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -121, message = b"Invalid character in number")]
    InvalidCharacterInNumber,
    /// `-123, "Exponent too large"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -123, message = b"Exponent too large")]
    ExponentTooLarge,
    /// `-124, "Too many digits"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -124, message = b"Too many digits")]
    TooManyDigits,
    /// `-128, "Numeric data not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -128, message = b"Numeric data not allowed")]
    NumericDataNotAllowed,
    /// `-130, "Suffix error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -130, message = b"Suffix error")]
    SuffixError,
    /// `-131, "Invalid suffix"`
    #[error(code = -131, message = b"Invalid suffix")]
    InvalidSuffix,
    /// `-134, "Suffix too long"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -134, message = b"Suffix too long")]
    SuffixTooLong,
    /// `-138, "Suffix not allowed"`
    #[error(code = -138, message = b"Suffix not allowed")]
    SuffixNotAllowed,
    /// `-140, "Character data error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -140, message = b"Character data error")]
    CharacterDataError,
    /// `-141, "Invalid character data"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -141, message = b"Invalid character data")]
    InvalidCharacterData,
    /// `-144, "Character data too long"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -144, message = b"Character data too long")]
    CharacterDataTooLong,
    /// `-148, "Character data not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -148, message = b"Character data not allowed")]
    CharacterDataNotAllowed,
    /// `-150, "String data error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -150, message = b"String data error")]
    StringDataError,
    /// `-151, "Invalid string data"`
    #[error(code = -151, message = b"Invalid string data")]
    InvalidStringData,
    /// `-158, "String data not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -158, message = b"String data not allowed")]
    StringDataNotAllowed,
    /// `-160, "Block data error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -160, message = b"Block data error")]
    BlockDataError,
    /// `-161, "Invalid block data"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -161, message = b"Invalid block data")]
    InvalidBlockData,
    /// `-168, "Block data not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -168, message = b"Block data not allowed")]
    BlockDataNotAllowed,
    /// `-170, "Expression error"`
    #[error(code = -170, message = b"Expression error")]
    ExpressionError,
    /// `-171, "Invalid expression"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -171, message = b"Invalid expression")]
    InvalidExpression,
    /// `-178, "Expression data not allowed"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -178, message = b"Expression data not allowed")]
    ExpressionDataNotAllowed,
    /// `-180, "Macro error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -180, message = b"Macro error")]
    MacroError,
    /// `-181, "Invalid outside macro definition"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -181, message = b"Invalid outside macro definition")]
    InvalidOutsideMacroDefinition,
    /// `-183, "Invalid inside macro definition"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -183, message = b"Invalid inside macro definition")]
    InvalidInsideMacroDefinition,
    /// `-184, "Macro parameter error"`
    #[cfg(feature = "error-codes-command")]
    #[error(code = -184, message = b"Macro parameter error")]
    MacroParameterError,

    ///# Execution Errors `[-299, -200]`
    /// `-200, "Execution error"`
    ///
    /// A program data element was outside its legal input range or a valid
    /// message could not be executed due to some device condition. Sets the
    /// execution error bit (bit 4) of the event status register.
    #[error(code = -200, message = b"Execution error")]
    ExecutionError,
    /// `-201, "Invalid while in local"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -201, message = b"Invalid while in local")]
    InvalidWhileInLocal,
    /// `-202, "Settings lost due to rtl"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -202, message = b"Settings lost due to rtl")]
    SettingsLostDueToRtl,
    /// `-203, "Command protected"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -203, message = b"Command protected")]
    CommandProtected,
    /// `-210, "Trigger error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -210, message = b"Trigger error")]
    TriggerError,
    /// `-211, "Trigger ignored"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -211, message = b"Trigger ignored")]
    TriggerIgnored,
    /// `-212, "Arm ignored"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -212, message = b"Arm ignored")]
    ArmIgnored,
    /// `-213, "Init ignored"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -213, message = b"Init ignored")]
    InitIgnored,
    /// `-214, "Trigger deadlock"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -214, message = b"Trigger deadlock")]
    TriggerDeadlock,
    /// `-215, "Arm deadlock"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -215, message = b"Arm deadlock")]
    ArmDeadlock,
    /// `-220, "Parameter error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -220, message = b"Parameter error")]
    ParameterError,
    /// `-221, "Settings conflict"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -221, message = b"Settings conflict")]
    SettingsConflict,
    /// `-222, "Data out of range"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -222, message = b"Data out of range")]
    DataOutOfRange,
    /// `-223, "Too much data"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -223, message = b"Too much data")]
    TooMuchData,
    /// `-224, "Illegal parameter value"`
    ///
    /// Used where an exact value, from a list of possibles, was expected.
    #[error(code = -224, message = b"Illegal parameter value")]
    IllegalParameterValue,
    /// `-225, "Out of memory"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -225, message = b"Out of memory")]
    OutOfMemory,
    /// `-226, "Lists not same length"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -226, message = b"Lists not same length")]
    ListsNotSameLength,
    /// `-230, "Data corrupt or stale"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -230, message = b"Data corrupt or stale")]
    DataCorruptOrStale,
    /// `-231, "Data questionable"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -231, message = b"Data questionable")]
    DataQuestionable,
    /// `-233, "Invalid version"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -233, message = b"Invalid version")]
    InvalidVersion,
    /// `-240, "Hardware error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -240, message = b"Hardware error")]
    HardwareError,
    /// `-241, "Hardware missing"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -241, message = b"Hardware missing")]
    HardwareMissing,
    /// `-250, "Mass storage error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -250, message = b"Mass storage error")]
    MassStorageError,
    /// `-251, "Missing mass storage"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -251, message = b"Missing mass storage")]
    MissingMassStorage,
    /// `-252, "Missing media"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -252, message = b"Missing media")]
    MissingMedia,
    /// `-253, "Corrupt media"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -253, message = b"Corrupt media")]
    CorruptMedia,
    /// `-254, "Media full"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -254, message = b"Media full")]
    MediaFull,
    /// `-255, "Directory full"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -255, message = b"Directory full")]
    DirectoryFull,
    /// `-256, "Filename not found"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -256, message = b"Filename not found")]
    FileNameNotFound,
    /// `-257, "Filename error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -257, message = b"Filename error")]
    FileNameError,
    /// `-258, "Media protected"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -258, message = b"Media protected")]
    MediaProtected,
    /// `-260, "Expression error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -260, message = b"Expression error")]
    ExecExpressionError,
    /// `-261, "Math error in expression"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -261, message = b"Math error in expression")]
    MathErrorInExpression,
    /// `-270, "Macro error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -270, message = b"Macro error")]
    ExecMacroError,
    /// `-271, "Macro syntax error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -271, message = b"Macro syntax error")]
    MacroSyntaxError,
    /// `-272, "Macro execution error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -272, message = b"Macro execution error")]
    MacroExecutionError,
    /// `-273, "Illegal macro label"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -273, message = b"Illegal macro label")]
    IllegalMacroLabel,
    /// `-274, "Macro parameter error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -274, message = b"Macro parameter error")]
    ExecMacroParameterError,
    /// `-275, "Macro definition too long"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -275, message = b"Macro definition too long")]
    MacroDefinitionTooLong,
    /// `-276, "Macro recursion error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -276, message = b"Macro recursion error")]
    MacroRecursionError,
    /// `-277, "Macro redefinition not allowed"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -277, message = b"Macro redefinition not allowed")]
    MacroRedefinitionNotAllowed,
    /// `-278, "Macro header not found"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -278, message = b"Macro header not found")]
    MacroHeaderNotFound,
    /// `-280, "Program error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -280, message = b"Program error")]
    ProgramError,
    /// `-281, "Cannot create program"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -281, message = b"Cannot create program")]
    CannotCreateProgram,
    /// `-282, "Illegal program name"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -282, message = b"Illegal program name")]
    IllegalProgramName,
    /// `-283, "Illegal variable name"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -283, message = b"Illegal variable name")]
    IllegalVariableName,
    /// `-284, "Program currently running"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -284, message = b"Program currently running")]
    ProgramCurrentlyRunning,
    /// `-285, "Program syntax error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -285, message = b"Program syntax error")]
    ProgramSyntaxError,
    /// `-286, "Program runtime error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -286, message = b"Program runtime error")]
    ProgramRuntimeError,
    /// `-290, "Memory use error"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -290, message = b"Memory use error")]
    MemoryUseError,
    /// `-291, "Out of memory"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -291, message = b"Out of memory")]
    UseOutOfMemory,
    /// `-292, "Referenced name does not exist"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -292, message = b"Referenced name does not exist")]
    ReferencedNameDoesNotExist,
    /// `-293, "Referenced name already exists"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -293, message = b"Referenced name already exists")]
    ReferencedNameAlreadyExists,
    /// `-294, "Incompatible type"`
    #[cfg(feature = "error-codes-execution")]
    #[error(code = -294, message = b"Incompatible type")]
    IncompatibleType,

    ///# Device-Specific Errors `[-399, -300]`
    /// `-300, "Device-specific error"`
    ///
    /// The device detected an error which is not a command, execution or
    /// query error. Sets the device-specific error bit (bit 3) of the event
    /// status register.
    #[cfg(feature = "error-codes-device")]
    #[error(code = -300, message = b"Device-specific error")]
    DeviceSpecificError,
    /// `-310, "System error"`
    #[error(code = -310, message = b"System error")]
    SystemError,
    /// `-311, "Memory error"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -311, message = b"Memory error")]
    MemoryError,
    /// `-312, "PUD memory lost"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -312, message = b"PUD memory lost")]
    PudMemoryLost,
    /// `-313, "Calibration memory lost"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -313, message = b"Calibration memory lost")]
    CalibrationMemoryLost,
    /// `-314, "Save/recall memory lost"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -314, message = b"Save/recall memory lost")]
    SaveRecallMemoryLost,
    /// `-315, "Configuration memory lost"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -315, message = b"Configuration memory lost")]
    ConfigurationMemoryLost,
    /// `-320, "Storage fault"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -320, message = b"Storage fault")]
    StorageFault,
    /// `-321, "Out of memory"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -321, message = b"Out of memory")]
    StOutOfMemory,
    /// `-330, "Self-test failed"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -330, message = b"Self-test failed")]
    SelfTestFailed,
    /// `-340, "Calibration failed"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -340, message = b"Calibration failed")]
    CalibrationFailed,
    /// `-350, "Queue overflow"`
    ///
    /// Entered into the queue in lieu of the code that caused the error:
    /// there was no room left in the queue to record it.
    #[error(code = -350, message = b"Queue overflow")]
    QueueOverflow,
    /// `-360, "Communication error"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -360, message = b"Communication error")]
    CommunicationError,
    /// `-361, "Parity error in program message"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -361, message = b"Parity error in program message")]
    ParityErrorInProgramMessage,
    /// `-362, "Framing error in program message"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -362, message = b"Framing error in program message")]
    FramingErrorInProgramMessage,
    /// `-363, "Input buffer overrun"`
    #[error(code = -363, message = b"Input buffer overrun")]
    InputBufferOverrun,
    /// `-365, "Time out error"`
    #[cfg(feature = "error-codes-device")]
    #[error(code = -365, message = b"Time out error")]
    TimeOutError,

    ///# Query Errors `[-499, -400]`
    /// `-400, "Query error"`
    ///
    /// The output queue control detected a message exchange protocol
    /// problem. Sets the query error bit (bit 2) of the event status
    /// register.
    #[cfg(feature = "error-codes-query")]
    #[error(code = -400, message = b"Query error")]
    QueryError,
    /// `-410, "Query INTERRUPTED"`
    #[cfg(feature = "error-codes-query")]
    #[error(code = -410, message = b"Query INTERRUPTED")]
    QueryInterrupted,
    /// `-420, "Query UNTERMINATED"`
    #[cfg(feature = "error-codes-query")]
    #[error(code = -420, message = b"Query UNTERMINATED")]
    QueryUnterminated,
    /// `-430, "Query DEADLOCKED"`
    #[cfg(feature = "error-codes-query")]
    #[error(code = -430, message = b"Query DEADLOCKED")]
    QueryDeadlocked,
    /// `-440, "Query UNTERMINATED after indefinite response"`
    #[cfg(feature = "error-codes-query")]
    #[error(code = -440, message = b"Query UNTERMINATED after indefinite response")]
    QueryUnterminatedAfterIndefiniteResponse,

    ///# Standard events `[-899, -500]`
    /// `-500, "Power on"`
    ///
    /// The instrument detected an off-to-on transition in its power supply.
    #[cfg(feature = "error-codes-events")]
    #[error(code = -500, message = b"Power on")]
    PowerOn,
    /// `-600, "User request"`
    #[cfg(feature = "error-codes-events")]
    #[error(code = -600, message = b"User request")]
    UserRequest,
    /// `-700, "Request control"`
    #[cfg(feature = "error-codes-events")]
    #[error(code = -700, message = b"Request control")]
    RequestControl,
    /// `-800, "Operation complete"`
    #[cfg(feature = "error-codes-events")]
    #[error(code = -800, message = b"Operation complete")]
    OperationComplete,
}

impl ErrorCode {
    /// Bitmask of the event-status bit this error/event raises when queued.
    ///
    /// Only the four IEEE 488.2 error classes map onto ESR bits; events and
    /// positive device-specific codes raise none.
    pub fn esr_mask(&self) -> u8 {
        match self.get_code() {
            -199..=-100 => EventStatusBit::CommandError.mask(),
            -299..=-200 => EventStatusBit::ExecutionError.mask(),
            -399..=-300 => EventStatusBit::DeviceDependantError.mask(),
            -499..=-400 => EventStatusBit::QueryError.mask(),
            _ => 0,
        }
    }

    /// Standard message for `code`.
    ///
    /// Codes not compiled into the table yield an empty string.
    pub fn translate(code: i16) -> &'static [u8] {
        Self::get_error(code)
            .map(|err| err.get_message())
            .unwrap_or(b"")
    }
}

/// Generic error queue trait
pub trait ErrorQueue {
    /// Add an error to the queue.
    /// Shall replace the newest error with a QueueOverflow error if full.
    fn push_back_error(&mut self, err: Error);

    /// Remove the oldest error from the queue.
    fn pop_front_error(&mut self) -> Option<Error>;

    /// Current length of queue
    fn num_errors(&self) -> usize;

    /// Clear queue
    fn clear_errors(&mut self);

    /// Is queue empty?
    fn is_empty(&self) -> bool {
        self.num_errors() == 0
    }
}

impl<'a, I, Q, const USER: usize> Context<'a, I, Q, USER>
where
    I: Interface,
    Q: ErrorQueue,
{
    /// Queue an error/event and raise the matching status bits.
    ///
    /// Raises the error-queue summary bit of the status byte and, for codes
    /// in the four IEEE 488.2 error classes, the classified event bit of the
    /// standard event status register. Code 0 is never stored.
    pub fn push_error(&mut self, error: impl Into<Error>) {
        let error = error.into();
        if error.get_code() == 0 {
            return;
        }
        let esr_mask = error.esr_mask();
        self.errors.push_back_error(error);
        // Both summary sources are in place before MSS is recomputed, so a
        // single service request carries the complete status byte
        self.set_stb_bit_raw(StatusBit::ErrorEventQueue as u8, true);
        if esr_mask != 0 {
            self.reg_set_bits(RegisterId::Esr, SubRegister::Event, esr_mask as u16);
        }
        self.update_mss();
    }

    /// Remove the oldest queued error/event.
    ///
    /// Returns [None] when the queue is empty. The error-queue summary bit
    /// of the status byte falls together with the last entry.
    pub fn pop_error(&mut self) -> Option<Error> {
        let error = self.errors.pop_front_error();
        if self.errors.is_empty() {
            self.set_stb_bit(StatusBit::ErrorEventQueue as u8, false);
        }
        error
    }

    /// Number of queued errors/events.
    pub fn error_count(&self) -> usize {
        self.errors.num_errors()
    }

    /// Empty the queue and drop the error-queue summary bit.
    pub fn clear_errors(&mut self) {
        self.errors.clear_errors();
        self.set_stb_bit(StatusBit::ErrorEventQueue as u8, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esr_mask() {
        assert_eq!(ErrorCode::InvalidCharacter.esr_mask(), 0x20);
        assert_eq!(ErrorCode::ExecutionError.esr_mask(), 0x10);
        assert_eq!(ErrorCode::SystemError.esr_mask(), 0x08);
        assert_eq!(Error::custom(-410, b"Query INTERRUPTED").esr_mask(), 0x04);
        assert_eq!(ErrorCode::NoError.esr_mask(), 0x00);
        assert_eq!(Error::custom(42, b"Whoops").esr_mask(), 0x00);
        assert_eq!(Error::custom(-500, b"Power on").esr_mask(), 0x00);
    }

    #[test]
    fn test_translate() {
        assert_eq!(ErrorCode::translate(0), b"No error");
        assert_eq!(ErrorCode::translate(-350), b"Queue overflow");
        assert_eq!(ErrorCode::translate(-113), b"Undefined header");
        // Not compiled in without the corresponding feature
        #[cfg(not(feature = "error-codes-query"))]
        assert_eq!(ErrorCode::translate(-400), b"");
        #[cfg(feature = "error-codes-query")]
        assert_eq!(ErrorCode::translate(-400), b"Query error");
        assert_eq!(ErrorCode::translate(12345), b"");
    }

    #[test]
    fn test_info_truncation() {
        let error = Error::extended(
            ErrorCode::SystemError,
            "an info string well beyond the bounded capacity",
        );
        assert_eq!(error.get_info().unwrap().len(), ERROR_INFO_CAPACITY);
        assert!(error.get_info().unwrap().starts_with("an info string"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_display() {
        let plain = Error::new(ErrorCode::QueueOverflow);
        assert_eq!(alloc::format!("{plain}"), "-350,\"Queue overflow\"");

        let extended = Error::extended(ErrorCode::SystemError, "flash");
        assert_eq!(alloc::format!("{extended}"), "-310,\"System error;flash\"");
    }
}
