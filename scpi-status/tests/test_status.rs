// Register-tree and error-queue behavior through the public API.

use scpi_status::prelude::*;

mod util;
use util::context;

#[test]
fn test_edge_detection_via_ptr() {
    let mut context = context();

    context.reg_set(RegisterId::Questionable, SubRegister::PTransition, 0x0001);
    context.reg_set(RegisterId::Questionable, SubRegister::Enable, 0x0001);
    context.set_sre(0x08);

    // Rising edge latches the event and requests service
    context.reg_set(RegisterId::Questionable, SubRegister::Condition, 0x0001);
    assert_eq!(context.stb() & 0x08, 0x08);
    assert_eq!(context.interface().srq.len(), 1);

    // Falling edge is filtered out (NTR = 0), nothing new happens
    context.reg_set(RegisterId::Questionable, SubRegister::Condition, 0x0000);
    assert_eq!(context.interface().srq.len(), 1);

    assert_eq!(context.reg_get(RegisterId::Questionable, SubRegister::Event), 1);
    assert_eq!(context.reg_get(RegisterId::Questionable, SubRegister::Event), 0);
    assert_eq!(context.stb(), 0x00);
}

#[test]
fn test_error_queue_feeds_status_byte() {
    let mut context = context();

    context.push_error(ErrorCode::UndefinedHeader);
    assert_eq!(context.error_count(), 1);
    // Queue summary in bit 2, command error class in ESR bit 5
    assert_eq!(context.stb(), 0x04);
    assert_eq!(context.reg_get(RegisterId::Esr, SubRegister::Event), 0x20);

    let error = context.pop_error().unwrap();
    assert_eq!(error, ErrorCode::UndefinedHeader);
    assert_eq!(error.get_code(), -113);
    assert_eq!(context.stb(), 0x00);
    assert_eq!(context.pop_error(), None);
}

#[test]
fn test_error_classification() {
    let mut context = context();

    context.push_error(ErrorCode::InvalidCharacter); // -101
    context.push_error(ErrorCode::ExecutionError); // -200
    context.push_error(ErrorCode::SystemError); // -310
    assert_eq!(
        context.reg_get(RegisterId::Esr, SubRegister::Event),
        0x20 | 0x10 | 0x08
    );

    context.push_error(Error::custom(-440, b"Query UNTERMINATED"));
    assert_eq!(context.reg_get(RegisterId::Esr, SubRegister::Event), 0x04);

    // Positive device-specific codes raise no ESR bit
    context.push_error(Error::custom(42, b"Flux capacitor failure"));
    assert_eq!(context.reg_get(RegisterId::Esr, SubRegister::Event), 0x00);
}

#[test]
fn test_srq_carries_complete_status_byte() {
    let mut context = context();
    // Enable both summary sources: error queue (bit 2) and ESB (bit 5)
    context.set_sre(0x24);
    context.reg_set(RegisterId::Esr, SubRegister::Enable, 0x0020);

    // One push raises both bits; the single service request reports the
    // final status byte, not an intermediate one
    context.push_error(ErrorCode::InvalidCharacter);
    assert_eq!(context.stb(), 0x64);
    assert_eq!(context.interface().srq.as_slice(), &[0x64]);
}

#[test]
fn test_push_pop_keeps_summaries_consistent() {
    let mut context = context();
    context.set_sre(0x24);
    context.reg_set(RegisterId::Esr, SubRegister::Enable, 0x0020);

    context.push_error(ErrorCode::InvalidCharacter);
    assert_eq!(context.stb(), 0x64);

    // Popping the only entry drops the queue summary; the latched ESR
    // event keeps MSS up, so there is no edge and no further request
    let error = context.pop_error().unwrap();
    assert_eq!(error.get_code(), -101);
    assert_eq!(context.stb(), 0x60);
    assert_eq!(context.interface().srq.as_slice(), &[0x64]);

    // Consuming the event register drops the last summary and MSS falls
    assert_eq!(context.reg_get(RegisterId::Esr, SubRegister::Event), 0x20);
    assert_eq!(context.stb(), 0x00);
    assert_eq!(context.interface().srq.as_slice(), &[0x64]);
}

#[test]
fn test_queue_overflow() {
    // Queue capacity is 4
    let mut context = context();

    context.push_error(ErrorCode::InvalidCharacter); // -101
    context.push_error(ErrorCode::InvalidSeparator); // -103
    context.push_error(ErrorCode::DataTypeError); // -104
    context.push_error(ErrorCode::ParameterNotAllowed); // -108
    context.push_error(ErrorCode::MissingParameter); // -109, dropped

    assert_eq!(context.error_count(), 4);
    assert_eq!(context.pop_error().unwrap().get_code(), -101);
    assert_eq!(context.pop_error().unwrap().get_code(), -103);
    assert_eq!(context.pop_error().unwrap().get_code(), -104);

    let overflow = context.pop_error().unwrap();
    assert_eq!(overflow.get_code(), -350);
    assert_eq!(overflow.get_message(), b"Queue overflow");

    assert_eq!(context.pop_error(), None);
    assert_eq!(context.stb(), 0x00);
}

#[test]
fn test_error_code_zero_is_not_stored() {
    let mut context = context();
    context.push_error(ErrorCode::NoError);
    assert_eq!(context.error_count(), 0);
    assert_eq!(context.stb(), 0x00);
}

#[test]
fn test_clear_errors() {
    let mut context = context();
    context.push_error(ErrorCode::SystemError);
    context.push_error(ErrorCode::InputBufferOverrun);
    assert_eq!(context.stb() & 0x04, 0x04);

    context.clear_errors();
    assert_eq!(context.error_count(), 0);
    assert_eq!(context.stb() & 0x04, 0x00);
}

#[test]
fn test_extended_error_info() {
    let mut context = context();
    context.push_error(Error::extended(ErrorCode::SystemError, "supply rail B"));

    let error = context.pop_error().unwrap();
    assert_eq!(error.get_info(), Some("supply rail B"));
    assert_eq!(error.to_string(), "-310,\"System error;supply rail B\"");
}
