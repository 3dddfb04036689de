use crate::{read_image, run, Config, IllegalPolicy, StopReason};
use color_eyre::eyre::Result;
use ntest::timeout;
use std::fs::write;
use std::str::FromStr;
use tempfile::tempdir;

const LOAD: u16 = 0x0200;

fn config(image: &[u8]) -> Config {
    Config {
        image: image.to_vec(),
        offset: LOAD,
        reset: Some(LOAD),
        max_instructions: 1000,
        on_illegal: IllegalPolicy::Halt,
    }
}

#[test]
#[timeout(10000)]
fn limit_test() -> Result<()> {
    let mut c = config(&[0xEA; 16]);
    c.max_instructions = 5;
    let s = run(&c)?;
    assert!(s.stop == StopReason::Limit, "Wrong stop: {s}");
    assert!(s.instructions == 5, "Ran {} instructions", s.instructions);
    assert!(s.cycles == 10, "Took {} cycles expected 10", s.cycles);
    assert!(s.state.pc == LOAD + 5, "PC is {:04X}", s.state.pc);
    Ok(())
}

#[test]
#[timeout(10000)]
fn trap_test() -> Result<()> {
    // LDA #$42, JMP $0202
    let s = run(&config(&[0xA9, 0x42, 0x4C, 0x02, 0x02]))?;
    assert!(s.stop == StopReason::Trap { pc: 0x0202 }, "Wrong stop: {s}");
    assert!(s.instructions == 2, "Ran {} instructions", s.instructions);
    assert!(s.cycles == 5, "Took {} cycles expected 5", s.cycles);
    assert!(s.state.a == 0x42, "A is {:02X}", s.state.a);
    Ok(())
}

#[test]
#[timeout(10000)]
fn trap_after_reset_test() -> Result<()> {
    // JMP $0000 lands on a BRK which vectors right back to 0x0000. The JMP
    // itself isn't a trap even though PC reads zero before the first tick.
    let mut c = config(&[0x4C, 0x00, 0x00]);
    c.max_instructions = 3;
    let s = run(&c)?;
    assert!(s.stop == StopReason::Trap { pc: 0x0000 }, "Wrong stop: {s}");
    assert!(s.instructions == 2, "Ran {} instructions", s.instructions);
    Ok(())
}

#[test]
#[timeout(10000)]
fn illegal_halt_test() -> Result<()> {
    let s = run(&config(&[0xEA, 0x02]))?;
    let want = StopReason::IllegalOpcode {
        op: 0x02,
        pc: LOAD + 1,
    };
    assert!(s.stop == want, "Wrong stop: {s}");
    assert!(s.instructions == 1, "Ran {} instructions", s.instructions);
    assert!(s.cycles == 2, "Took {} cycles expected 2", s.cycles);
    assert!(s.state.pc == LOAD + 2, "PC is {:04X}", s.state.pc);
    Ok(())
}

#[test]
#[timeout(10000)]
fn illegal_nop_test() -> Result<()> {
    // .byte $02, JMP $0201
    let mut c = config(&[0x02, 0x4C, 0x01, 0x02]);
    c.on_illegal = IllegalPolicy::Nop;
    let s = run(&c)?;
    assert!(s.stop == StopReason::Trap { pc: 0x0201 }, "Wrong stop: {s}");
    assert!(s.instructions == 2, "Ran {} instructions", s.instructions);
    assert!(s.cycles == 5, "Took {} cycles expected 5", s.cycles);
    Ok(())
}

#[test]
fn policy_parse_test() -> Result<()> {
    assert!(IllegalPolicy::from_str("nop")? == IllegalPolicy::Nop, "nop didn't parse");
    assert!(IllegalPolicy::from_str("HALT")? == IllegalPolicy::Halt, "HALT didn't parse");
    assert!(IllegalPolicy::from_str("skip").is_err(), "skip parsed");
    assert!(IllegalPolicy::default() == IllegalPolicy::Halt, "Default not Halt");
    Ok(())
}

#[test]
fn too_large_test() {
    let mut c = config(&[0xEA, 0xEA]);
    c.offset = 0xFFFF;
    assert!(run(&c).is_err(), "Image past 0xFFFF accepted");
}

#[test]
#[timeout(10000)]
fn image_file_test() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("image.bin");

    assert!(read_image(&path).is_err(), "Missing file read");

    // A full 64k image with the reset vector pointing at a LDX/trap.
    let mut image = vec![0u8; 1 << 16];
    image[0x0400..0x0405].copy_from_slice(&[0xA2, 0x07, 0x4C, 0x02, 0x04]);
    image[0xFFFC] = 0x00;
    image[0xFFFD] = 0x04;
    write(&path, &image)?;

    let c = Config {
        image: read_image(&path)?,
        max_instructions: 100,
        ..Config::default()
    };
    let s = run(&c)?;
    assert!(s.stop == StopReason::Trap { pc: 0x0402 }, "Wrong stop: {s}");
    assert!(s.state.x == 0x07, "X is {:02X}", s.state.x);

    write(&path, vec![0u8; (1 << 16) + 1])?;
    assert!(read_image(&path).is_err(), "Oversized image read");
    Ok(())
}

#[test]
#[timeout(10000)]
fn json_test() -> Result<()> {
    let s = run(&config(&[0xA9, 0x42, 0x4C, 0x02, 0x02]))?;
    let v = serde_json::to_value(&s)?;
    assert!(v["stop"]["Trap"]["pc"] == 0x0202, "Wrong stop: {v}");
    assert!(v["state"]["a"] == 0x42, "Wrong A: {v}");
    assert!(v["instructions"] == 2, "Wrong count: {v}");
    Ok(())
}
