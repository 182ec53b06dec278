// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An example decoding a bytecode stream through a `ModDict` of opcodes.

use moddict::{BuildOptions, KeyWidth, ModDict, SearchBound};

/// What the decoder needs to know about each instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpInfo {
    mnemonic: &'static str,
    operands: usize,
}

const fn op(mnemonic: &'static str, operands: usize) -> OpInfo {
    OpInfo { mnemonic, operands }
}

fn main() {
    // Opcodes are sparse bytes, and known ahead of time.
    let table = ModDict::from_pairs_with_options(
        [
            (0x00u8, op("nop", 0)),
            (0x10, op("push", 1)),
            (0x11, op("pop", 0)),
            (0x20, op("add", 0)),
            (0x21, op("sub", 0)),
            (0x40, op("jmp", 2)),
            (0x41, op("jz", 2)),
            (0xff, op("halt", 0)),
        ],
        BuildOptions::new()
            .with_key_width(KeyWidth::U8)
            .with_search_bound(SearchBound::ThroughMaxKeyPlusOne),
    )
    .expect("opcodes are distinct bytes");

    println!(
        "{} opcodes in {} remainder slots",
        table.len(),
        table.divisor()
    );
    let layout = table
        .keys_by_remainder()
        .map(|key| match key {
            Some(key) => format!("{key:#04x}"),
            None => "----".to_owned(),
        })
        .collect::<Vec<_>>();
    println!("layout: [{}]", layout.join(", "));

    let program = [0x10u8, 0x05, 0x10, 0x07, 0x20, 0x41, 0x00, 0x02, 0x33, 0xff];
    let mut pc = 0;
    while pc < program.len() {
        let byte = program[pc];
        match table.try_get(byte) {
            Ok(info) => {
                let operands = &program[pc + 1..pc + 1 + info.operands];
                println!("{pc:>3}: {:<5} {operands:?}", info.mnemonic);
                pc += 1 + info.operands;
            }
            Err(error) => {
                println!("{pc:>3}: invalid byte {byte:#04x} ({error})");
                pc += 1;
            }
        }
    }

    // The table can't be patched at runtime.
    let error = table.insert(0x33u8, op("mul", 0)).unwrap_err();
    println!("{error}");
    assert_eq!(error.into_rejected(), op("mul", 0));
    assert!(!table.contains_key(0x33u8));
}
