//! Fuzz the assembler: arbitrary source text must never panic, and a
//! successful assembly must satisfy the pass-consistency invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rv32sim::Assembler;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let program = Assembler::new().assemble(source);

    if program.success() {
        // Every source-map address must point inside the emitted text
        let end = program.text_base + 4 * program.text.len() as u32;
        for &addr in program.source_map.keys() {
            assert!(addr >= program.text_base && addr < end);
            assert_eq!(addr % 4, 0);
        }
    }
});
