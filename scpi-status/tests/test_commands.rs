// Mandated IEEE 488.2 common commands, end to end.

use scpi_status::prelude::*;

mod util;
use util::{context, context_with_idn, TestFormatter, TestParameters};

#[test]
fn test_srq_on_operation_complete() {
    let mut context = context();
    let mut response = TestFormatter::new();

    // Enable the OPC bit in the event status enable register
    context
        .exec_ese(&mut TestParameters::with(&[1]))
        .unwrap();
    context.exec_opc().unwrap();
    assert_eq!(context.stb(), 0x20);
    assert!(context.interface().srq.is_empty());

    // Enabling ESB in SRE raises MSS and requests service exactly once
    context
        .exec_sre(&mut TestParameters::with(&[32]))
        .unwrap();
    assert_eq!(context.interface().srq.as_slice(), &[0x60]);

    context.query_stb(&mut response).unwrap();
    assert_eq!(response.take(), "96");

    // Reading the event register clears it and the summary collapses
    context.query_esr(&mut response).unwrap();
    assert_eq!(response.take(), "1");
    context.query_esr(&mut response).unwrap();
    assert_eq!(response.take(), "0");

    context.query_stb(&mut response).unwrap();
    assert_eq!(response.take(), "0");
    assert_eq!(context.interface().srq.len(), 1);
}

#[test]
fn test_cls() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context
        .exec_ese(&mut TestParameters::with(&[255]))
        .unwrap();
    context.push_error(ErrorCode::InvalidCharacter);
    context.push_error(ErrorCode::ExecutionError);
    context.push_error(ErrorCode::SystemError);
    context.reg_set(RegisterId::Esr, SubRegister::Event, 0x0010);
    assert_ne!(context.stb(), 0);

    context.exec_cls().unwrap();
    assert_eq!(context.error_count(), 0);
    assert_eq!(context.stb(), 0);

    context.query_esr(&mut response).unwrap();
    assert_eq!(response.take(), "0");
    // The enable register survives
    context.query_ese(&mut response).unwrap();
    assert_eq!(response.take(), "255");
}

#[test]
fn test_cls_preserves_conditions() {
    let mut context = context();

    context.reg_set(RegisterId::Questionable, SubRegister::Enable, 0x0001);
    context.reg_set(RegisterId::Questionable, SubRegister::Condition, 0x0001);
    assert_eq!(context.stb(), 0x08);

    context.exec_cls().unwrap();
    assert_eq!(context.stb(), 0x00);
    assert_eq!(context.reg_get(RegisterId::Questionable, SubRegister::Event), 0);
    // The underlying condition is hardware state and survives *CLS
    let mut response = TestFormatter::new();
    context.query_stb(&mut response).unwrap();
    assert_eq!(response.take(), "0");
}

#[test]
fn test_idn() {
    let mut context = context_with_idn(Identification {
        manufacturer: Some(b"ACME"),
        model: Some(b"X1"),
        serial: None,
        firmware: Some(b"1.0"),
    });
    let mut response = TestFormatter::new();

    context.query_idn(&mut response).unwrap();
    assert_eq!(response.take(), "ACME,X1,0,1.0");
}

#[test]
fn test_ese_roundtrip() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context.query_ese(&mut response).unwrap();
    assert_eq!(response.take(), "0");

    context
        .exec_ese(&mut TestParameters::with(&[255]))
        .unwrap();
    context.query_ese(&mut response).unwrap();
    assert_eq!(response.take(), "255");
}

#[test]
fn test_sre_roundtrip() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context.query_sre(&mut response).unwrap();
    assert_eq!(response.take(), "0");

    context
        .exec_sre(&mut TestParameters::with(&[255]))
        .unwrap();
    context.query_sre(&mut response).unwrap();
    assert_eq!(response.take(), "255");
}

#[test]
fn test_missing_parameter() {
    let mut context = context();

    let err = context.exec_ese(&mut TestParameters::empty()).unwrap_err();
    assert_eq!(err, ErrorCode::MissingParameter);

    // The dispatch loop records the failure
    context.push_error(err);
    assert_eq!(context.pop_error().unwrap().get_code(), -109);
}

#[test]
fn test_opc_query() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context.query_opc(&mut response).unwrap();
    assert_eq!(response.take(), "1");
}

#[test]
fn test_rst() {
    let mut context = context();

    context
        .exec_ese(&mut TestParameters::with(&[255]))
        .unwrap();
    context.exec_rst().unwrap();
    assert_eq!(context.interface().resets, 1);

    // Reset does not touch the status structures
    let mut response = TestFormatter::new();
    context.query_ese(&mut response).unwrap();
    assert_eq!(response.take(), "255");
}

#[test]
fn test_tst_query() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context.query_tst(&mut response).unwrap();
    assert_eq!(response.take(), "0");
}

#[test]
fn test_wai() {
    let mut context = context();
    context.exec_wai().unwrap();
}

#[test]
fn test_stb_includes_mav() {
    let mut context = context();
    let mut response = TestFormatter::new();

    context.set_mav(true);
    context.query_stb(&mut response).unwrap();
    assert_eq!(response.take(), "16");

    context.set_mav(false);
    context.query_stb(&mut response).unwrap();
    assert_eq!(response.take(), "0");
}
