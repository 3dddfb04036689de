use crate::{FlatRAM, Memory, Vectors, IRQ_VECTOR, MAX_SIZE, NMI_VECTOR, RESET_VECTOR};

#[test]
fn array_memory() {
    let mut r: [u8; MAX_SIZE] = [0xFF; MAX_SIZE];

    r.power_on();
    assert!(r.read(0x1234) == 0x00, "Bad value");
    r.write(0x1234, 0xAE);
    assert!(r.read(0x1234) == 0xAE, "Bad value");
}

#[test]
fn flat_ram_power_on() {
    let mut r = FlatRAM::new()
        .fill_value(0xEA)
        .vectors(Vectors {
            nmi: 0x1234,
            reset: 0x8000,
            irq: 0xC0DE,
        });
    assert!(r.read(0x0200) == 0x00, "RAM filled before power_on");

    r.power_on();
    assert!(r.read(0x0200) == 0xEA, "Fill value not applied");
    assert!(r.read(0xFFF9) == 0xEA, "Fill value not applied below vectors");

    for (vec, want) in [
        (NMI_VECTOR, 0x1234u16),
        (RESET_VECTOR, 0x8000),
        (IRQ_VECTOR, 0xC0DE),
    ] {
        let got = u16::from(r.read(vec)) | (u16::from(r.read(vec + 1)) << 8);
        assert!(got == want, "Vector {vec:04X} got {got:04X} want {want:04X}");
    }
}

#[test]
fn load_wraps() {
    let mut r = FlatRAM::default();
    r.power_on();
    r.load(0xFFFE, &[0x01, 0x02, 0x03, 0x04]);
    assert!(r.read(0xFFFE) == 0x01, "Bad value at 0xFFFE");
    assert!(r.read(0xFFFF) == 0x02, "Bad value at 0xFFFF");
    assert!(r.read(0x0000) == 0x03, "Load didn't wrap to 0x0000");
    assert!(r.read(0x0001) == 0x04, "Load didn't wrap to 0x0001");
}

#[test]
fn debug_builder_passes_through() {
    let mut r = FlatRAM::new().debug();
    r.power_on();
    r.write(0x00FF, 0x42);
    assert!(r.read(0x00FF) == 0x42, "Debug FlatRAM lost a write");
}
